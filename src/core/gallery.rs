use std::fmt;

use crate::{
    core::preview::preview,
    types::{Project, ProjectCard, DEFAULT_CARD_IMAGE, DEFAULT_CARD_YEAR},
};

pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => project.category == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

pub fn category_label(category: &str) -> &'static str {
    match category {
        "monuments" => "Памятник",
        "decorative" => "Декоративная",
        "interactive" => "Интерактивная",
        _ => "Скульптура",
    }
}

/// Records whose category matches, in source order.
pub fn filter_by_category<'a, I>(projects: I, filter: &CategoryFilter) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    projects
        .into_iter()
        .filter(|project| filter.matches(project))
        .collect()
}

/// Records whose title or description contains `query`, ignoring case.
/// A blank query keeps everything.
pub fn search<'a, I>(projects: I, query: &str) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    if query.trim().is_empty() {
        return projects.into_iter().collect();
    }
    let needle = query.to_lowercase();
    projects
        .into_iter()
        .filter(|project| matches_query(project, &needle))
        .collect()
}

fn matches_query(project: &Project, lowered_query: &str) -> bool {
    project.title.to_lowercase().contains(lowered_query)
        || project.description.to_lowercase().contains(lowered_query)
}

/// Positions in `projects` that pass both the category filter and the query.
pub fn view_indices(projects: &[Project], filter: &CategoryFilter, query: &str) -> Vec<usize> {
    let blank = query.trim().is_empty();
    let needle = query.to_lowercase();
    projects
        .iter()
        .enumerate()
        .filter(|(_, project)| filter.matches(project))
        .filter(|(_, project)| blank || matches_query(project, &needle))
        .map(|(index, _)| index)
        .collect()
}

pub fn project_card(project: &Project) -> ProjectCard {
    let year = if project.year.is_empty() {
        DEFAULT_CARD_YEAR.to_string()
    } else {
        project.year.clone()
    };
    ProjectCard {
        id: project.id.clone(),
        title: project.title.clone(),
        slug: project.slug.clone(),
        year,
        category: project.category.clone(),
        category_label: category_label(&project.category).to_string(),
        image: project
            .images
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_CARD_IMAGE.to_string()),
        preview: preview(project.body_text()),
    }
}

pub fn find_by_slug<'a>(projects: &'a [Project], slug: &str) -> Option<&'a Project> {
    projects.iter().find(|project| project.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, title: &str, description: &str, category: &str) -> Project {
        Project {
            id: id.to_string(),
            title: title.to_string(),
            slug: format!("slug-{}", id),
            description: description.to_string(),
            markdown: None,
            images: Vec::new(),
            category: category.to_string(),
            year: String::new(),
        }
    }

    fn sample() -> Vec<Project> {
        vec![
            project("1", "Барон Мюнхгаузен", "Памятник у метро", "monuments"),
            project("2", "Fountain", "Decorative bronze fountain", "decorative"),
            project("3", "Sherlock Holmes", "Literary heroes", "monuments"),
            project("4", "Swing", "Kids can ride the BRONZE swing", "interactive"),
        ]
    }

    fn ids(projects: &[&Project]) -> Vec<String> {
        projects.iter().map(|project| project.id.clone()).collect()
    }

    #[test]
    fn all_filter_keeps_everything() {
        let projects = sample();
        let filtered = filter_by_category(&projects, &CategoryFilter::parse("all"));
        assert_eq!(ids(&filtered), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn category_filter_preserves_order_and_is_idempotent() {
        let projects = sample();
        let filter = CategoryFilter::parse("monuments");
        let once = filter_by_category(&projects, &filter);
        assert_eq!(ids(&once), vec!["1", "3"]);
        let twice = filter_by_category(once.iter().copied(), &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_category_yields_empty_view() {
        let projects = sample();
        assert!(filter_by_category(&projects, &CategoryFilter::parse("ceramics")).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let projects = sample();
        assert_eq!(ids(&search(&projects, "bronze")), vec!["2", "4"]);
        assert_eq!(ids(&search(&projects, "барон")), vec!["1"]);
        assert_eq!(ids(&search(&projects, "SHERLOCK")), vec!["3"]);
    }

    #[test]
    fn blank_query_keeps_everything() {
        let projects = sample();
        assert_eq!(search(&projects, "").len(), 4);
        assert_eq!(search(&projects, "   ").len(), 4);
    }

    #[test]
    fn search_is_idempotent() {
        let projects = sample();
        let once = search(&projects, "bronze");
        let twice = search(once.iter().copied(), "bronze");
        assert_eq!(once, twice);
    }

    #[test]
    fn view_indices_compose_filter_and_query() {
        let projects = sample();
        let view = view_indices(&projects, &CategoryFilter::parse("decorative"), "BRONZE");
        assert_eq!(view, vec![1]);
        let view = view_indices(&projects, &CategoryFilter::All, "");
        assert_eq!(view, vec![0, 1, 2, 3]);
    }

    #[test]
    fn card_uses_defaults() {
        let card = project_card(&project("9", "Bust", "Plain words", "garden"));
        assert_eq!(card.image, DEFAULT_CARD_IMAGE);
        assert_eq!(card.year, DEFAULT_CARD_YEAR);
        assert_eq!(card.category_label, "Скульптура");
        assert_eq!(card.preview, "Plain words");
    }

    #[test]
    fn card_preview_prefers_markdown() {
        let mut source = project("9", "Bust", "Plain words", "monuments");
        source.markdown = Some("## Heading\n*Rich* words".to_string());
        source.images = vec!["resources/projects/bust-01.jpg".to_string()];
        source.year = "1999".to_string();
        let card = project_card(&source);
        assert_eq!(card.preview, "Heading Rich words");
        assert_eq!(card.image, "resources/projects/bust-01.jpg");
        assert_eq!(card.year, "1999");
        assert_eq!(card.category_label, "Памятник");
    }

    #[test]
    fn filter_display_round_trips_sentinel() {
        assert_eq!(CategoryFilter::parse("all").to_string(), "all");
        assert_eq!(CategoryFilter::parse("decorative").to_string(), "decorative");
    }
}
