//! Repository specifications used by the league

use crud_pipeline::repository::QuerySpecification;

use crate::domain::Team;

/// Teams whose name equals `name`, ignoring case
pub fn teams_by_name(name: &str) -> QuerySpecification<Team> {
    let wanted = name.to_lowercase();
    QuerySpecification::new(format!("teams named '{name}'"), move |team: &Team| {
        team.name().to_lowercase() == wanted
    })
}

#[cfg(test)]
mod tests {
    use crud_pipeline::repository::Specification;

    use super::*;

    #[test]
    fn test_match_ignores_case() {
        let lions = Team::create("Lions").unwrap();
        assert!(teams_by_name("lions").is_satisfied_by(&lions));
        assert!(teams_by_name("LIONS").is_satisfied_by(&lions));
        assert!(!teams_by_name("Lion").is_satisfied_by(&lions));
        assert_eq!(teams_by_name("Lions").describe(), "teams named 'Lions'");
    }
}
