//! Name-substring filtering for recipe listings.

use serde::Deserialize;

use crate::models::Recipe;

/// Query parameters accepted by `GET /recipes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeQuery {
    pub name: Option<String>,
}

impl RecipeQuery {
    pub fn name_filter(&self) -> NameFilter<'_> {
        NameFilter::new(self.name.as_deref())
    }
}

/// Predicate over recipe names: literal, case-sensitive containment
#[derive(Debug, Clone, Copy, Default)]
pub struct NameFilter<'a> {
    needle: Option<&'a str>,
}

impl<'a> NameFilter<'a> {
    /// An absent or empty substring matches every recipe
    pub fn new(needle: Option<&'a str>) -> Self {
        Self {
            needle: needle.filter(|n| !n.is_empty()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.needle.is_some()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self.needle {
            Some(needle) => recipe.name.contains(needle),
            None => true,
        }
    }

    pub fn apply(&self, recipes: Vec<Recipe>) -> Vec<Recipe> {
        if !self.is_active() {
            return recipes;
        }
        recipes.into_iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: i64, name: &str) -> Recipe {
        Recipe {
            id,
            name: name.to_string(),
            description: String::new(),
            ingredients: vec![],
        }
    }

    fn filter_by_name(recipes: Vec<Recipe>, name: Option<&str>) -> Vec<Recipe> {
        NameFilter::new(name).apply(recipes)
    }

    fn names(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_no_filter_is_identity() {
        let all = vec![recipe(1, "a"), recipe(2, "b")];
        assert_eq!(filter_by_name(all.clone(), None), all);
        assert_eq!(filter_by_name(all.clone(), Some("")), all);
    }

    #[test]
    fn test_filter_selects_by_prefix() {
        let all = vec![
            recipe(1, "Selected"),
            recipe(2, "Selected v2"),
            recipe(3, "DifferentName"),
        ];

        let filtered = filter_by_name(all, Some("Select"));
        assert_eq!(names(&filtered), vec!["Selected", "Selected v2"]);
    }

    #[test]
    fn test_filter_matches_inner_substring() {
        let filtered = filter_by_name(vec![recipe(1, "abc")], Some("b"));
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_filter_is_case_sensitive_and_literal() {
        let all = vec![recipe(1, "Pasta"), recipe(2, "50% cocoa")];

        assert!(filter_by_name(all.clone(), Some("pasta")).is_empty());
        assert!(filter_by_name(all.clone(), Some("P_sta")).is_empty());
        assert_eq!(names(&filter_by_name(all, Some("%"))), vec!["50% cocoa"]);
    }

    #[test]
    fn test_query_builds_filter() {
        let query = RecipeQuery {
            name: Some("Sel".to_string()),
        };
        assert!(query.name_filter().is_active());
        assert!(!RecipeQuery::default().name_filter().is_active());
    }
}
