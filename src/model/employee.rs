use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
pub enum Sex {
    Male,
    Female,
}

// stored as VARCHAR, decoded through FromRow's try_from
impl TryFrom<String> for Sex {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub sex: Sex,
    pub date_of_birth: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_column_round_trips_through_text() {
        assert_eq!(Sex::Female.as_ref(), "Female");
        assert_eq!(Sex::try_from("Male".to_string()).unwrap(), Sex::Male);
        assert!(Sex::try_from("male ".to_string()).is_err());
    }
}
