use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Separator used when flattening the selected skills into one column.
pub const SKILLS_SEPARATOR: &str = ",";

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub mobile: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub other_city: Option<String>,
    pub skills: String,
}

/// Raw profile submission. `skills` keeps every submitted value in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub dob: String,
    pub gender: String,
    pub address: String,
    pub country: String,
    pub city: String,
    pub other_city: String,
    pub skills: Vec<String>,
}

impl ProfileForm {
    /// Build a form from url-encoded pairs; repeated `skills` keys accumulate.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = ProfileForm::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "first_name" => form.first_name = value,
                "last_name" => form.last_name = value,
                "email" => form.email = value,
                "mobile" => form.mobile = value,
                "dob" => form.dob = value,
                "gender" => form.gender = value,
                "address" => form.address = value,
                "country" => form.country = value,
                "city" => form.city = value,
                "other_city" => form.other_city = value,
                "skills" | "skills[]" => form.skills.push(value),
                _ => {}
            }
        }
        form
    }

    pub fn from_urlencoded(body: &[u8]) -> Self {
        Self::from_pairs(
            form_urlencoded::parse(body).map(|(k, v)| (k.into_owned(), v.into_owned())),
        )
    }
}

impl From<&EmployeeProfile> for ProfileForm {
    fn from(profile: &EmployeeProfile) -> Self {
        ProfileForm {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone().unwrap_or_default(),
            email: profile.email.clone(),
            mobile: profile.mobile.clone().unwrap_or_default(),
            dob: profile.dob.clone().unwrap_or_default(),
            gender: profile.gender.clone().unwrap_or_default(),
            address: profile.address.clone().unwrap_or_default(),
            country: profile.country.clone().unwrap_or_default(),
            city: profile.city.clone().unwrap_or_default(),
            other_city: profile.other_city.clone().unwrap_or_default(),
            skills: split_skills(&profile.skills),
        }
    }
}

pub fn join_skills(skills: &[String]) -> String {
    skills.join(SKILLS_SEPARATOR)
}

pub fn split_skills(skills: &str) -> Vec<String> {
    if skills.is_empty() {
        return Vec::new();
    }
    skills.split(SKILLS_SEPARATOR).map(String::from).collect()
}

/// Validated profile written by create and edit.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileInput {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub mobile: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub other_city: Option<String>,
    pub skills: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProfileSearch {
    pub name: Option<String>,
    pub mobile: Option<String>,
}

impl ProfileSearch {
    pub fn name_filter(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    pub fn mobile_filter(&self) -> Option<&str> {
        non_blank(self.mobile.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_skills_keep_order_and_duplicates() {
        let form = ProfileForm::from_urlencoded(
            b"first_name=Ana&skills=AWS&skills=DevOps&skills=AWS&email=a%40b.io",
        );
        assert_eq!(form.first_name, "Ana");
        assert_eq!(form.email, "a@b.io");
        assert_eq!(form.skills, vec!["AWS", "DevOps", "AWS"]);
        assert_eq!(join_skills(&form.skills), "AWS,DevOps,AWS");
    }

    #[test]
    fn split_of_empty_skills_is_empty() {
        assert!(split_skills("").is_empty());
        assert_eq!(split_skills("Middleware"), vec!["Middleware"]);
    }

    #[test]
    fn blank_search_filters_are_dropped() {
        let search = ProfileSearch {
            name: Some("  ".to_string()),
            mobile: Some(" 98 ".to_string()),
        };
        assert_eq!(search.name_filter(), None);
        assert_eq!(search.mobile_filter(), Some("98"));
    }
}
