use crate::utils::validation;
use validator::ValidationError;

pub const CAREERS: [&str; 6] = [
    "Web Development",
    "Mobile Development",
    "UI/UX",
    "Data Science",
    "Business",
    "Other",
];

#[allow(clippy::ptr_arg)]
pub fn careers(careers: &Vec<String>) -> Result<(), ValidationError> {
    if careers.is_empty() {
        return Err(validation::error(
            "careers",
            "Please add at least one career",
        ));
    }

    if careers.iter().any(|career| !CAREERS.contains(&career.as_str())) {
        return Err(validation::error(
            "careers",
            "Careers must be one of Web Development, Mobile Development, UI/UX, Data Science, Business, Other",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_careers() {
        assert!(careers(&vec![String::from("UI/UX"), String::from("Business")]).is_ok());
    }

    #[test]
    fn rejects_empty_and_unknown_careers() {
        assert!(careers(&vec![]).is_err());
        assert!(careers(&vec![String::from("Web Development"), String::from("Cooking")]).is_err());
    }
}
