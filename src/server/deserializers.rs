use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    String(String),
}

// clients send ids both as JSON numbers and as strings ("5"), accept either
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "NumberOrString")]
pub struct LooseI64(pub i64);

impl TryFrom<NumberOrString> for LooseI64 {
    type Error = String;

    fn try_from(value: NumberOrString) -> Result<Self, Self::Error> {
        match value {
            NumberOrString::Number(v) => Ok(LooseI64(v)),
            NumberOrString::String(s) => match s.trim().parse::<i64>() {
                Ok(v) => Ok(LooseI64(v)),
                Err(_) => Err(format!("Wrong value {s}, can not parse to i64")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LooseI64;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let ids: Vec<LooseI64> = serde_json::from_str(r#"[1, "2", " 3 "]"#).unwrap();
        assert_eq!(ids, vec![LooseI64(1), LooseI64(2), LooseI64(3)]);
    }

    #[test]
    fn rejects_non_numeric_strings() {
        assert!(serde_json::from_str::<LooseI64>(r#""art""#).is_err());
        assert!(serde_json::from_str::<LooseI64>("true").is_err());
    }
}
