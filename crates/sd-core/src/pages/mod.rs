//! Page services.
//!
//! Each page owns the records it shows and re-fetches them after a mutation.
//! A failed request leaves the page's current records untouched.

pub mod assignments;
pub mod dashboard;
pub mod employees;
pub mod reports;
pub mod servers;
pub mod sites;

/// Asked before deleting an employee, site or server.
pub const DELETE_CONFIRM_PROMPT: &str = "정말 삭제하시겠습니까?";

/// Asked before ending an assignment.
pub const END_ASSIGNMENT_PROMPT: &str = "파견을 종료하시겠습니까?";

/// Today's date in local time, as the pages use it for default dates.
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Query pairs borrowed for [`crate::api::ApiClient::get`].
pub(crate) fn borrow_query<'a>(
    pairs: &'a [(&'static str, String)],
) -> Vec<(&'static str, &'a str)> {
    pairs.iter().map(|(k, v)| (*k, v.as_str())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borrow_query_keeps_order() {
        let owned = vec![("status", "대기".to_string()), ("search", "java".to_string())];
        assert_eq!(borrow_query(&owned), vec![("status", "대기"), ("search", "java")]);
    }
}
