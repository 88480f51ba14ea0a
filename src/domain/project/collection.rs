//! Ordered project collection with unique ids.

use std::collections::HashSet;
use thiserror::Error;

use super::Project;
use crate::domain::foundation::ProjectId;

/// Violations of the collection's id-uniqueness invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("Duplicate project id: {0}")]
    DuplicateId(ProjectId),
}

/// Projects in display order. Ids are unique among current entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectCollection {
    projects: Vec<Project>,
}

impl ProjectCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from a sequence, keeping its order.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::DuplicateId` for the first repeated id.
    pub fn from_vec(projects: Vec<Project>) -> Result<Self, CollectionError> {
        let mut seen = HashSet::with_capacity(projects.len());
        for project in &projects {
            if !seen.insert(&project.id) {
                return Err(CollectionError::DuplicateId(project.id.clone()));
            }
        }
        Ok(Self { projects })
    }

    /// Appends a project at the end.
    pub fn push(&mut self, project: Project) -> Result<(), CollectionError> {
        if self.contains(&project.id) {
            return Err(CollectionError::DuplicateId(project.id));
        }
        self.projects.push(project);
        Ok(())
    }

    /// Replaces the entry with the same id in place.
    ///
    /// Returns `false` (and changes nothing) when no entry matches.
    pub fn replace(&mut self, project: Project) -> bool {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => {
                *slot = project;
                true
            }
            None => false,
        }
    }

    /// Removes the entry with the given id, returning it.
    pub fn remove(&mut self, id: &ProjectId) -> Option<Project> {
        let pos = self.projects.iter().position(|p| &p.id == id)?;
        Some(self.projects.remove(pos))
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &ProjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Project> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn as_slice(&self) -> &[Project] {
        &self.projects
    }

    /// Projects flagged as favorite, in display order.
    pub fn favorites(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.is_favorite()).collect()
    }

    /// Projects whose title contains `query`, ignoring case.
    ///
    /// A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Project> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.projects.iter().collect();
        }
        self.projects
            .iter()
            .filter(|p| p.title().to_lowercase().contains(&needle))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ProjectCollection {
    type Item = &'a Project;
    type IntoIter = std::slice::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::ProjectDraft;
    use proptest::prelude::*;

    fn project(id: u64, title: &str) -> Project {
        Project::from_draft(ProjectId::number(id), ProjectDraft::new(title, "red").unwrap())
    }

    fn collection(ids: &[u64]) -> ProjectCollection {
        ProjectCollection::from_vec(ids.iter().map(|&id| project(id, "p")).collect()).unwrap()
    }

    fn ids(collection: &ProjectCollection) -> Vec<ProjectId> {
        collection.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn from_vec_keeps_order() {
        let c = collection(&[3, 1, 2]);
        assert_eq!(
            ids(&c),
            vec![ProjectId::number(3), ProjectId::number(1), ProjectId::number(2)]
        );
    }

    #[test]
    fn from_vec_rejects_duplicates() {
        let result = ProjectCollection::from_vec(vec![project(1, "a"), project(1, "b")]);
        assert_eq!(
            result,
            Err(CollectionError::DuplicateId(ProjectId::number(1)))
        );
    }

    #[test]
    fn push_appends_at_end() {
        let mut c = collection(&[1]);
        c.push(project(7, "B")).unwrap();
        assert_eq!(ids(&c), vec![ProjectId::number(1), ProjectId::number(7)]);
    }

    #[test]
    fn push_rejects_existing_id() {
        let mut c = collection(&[1]);
        assert!(c.push(project(1, "again")).is_err());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn replace_swaps_in_place() {
        let mut c = collection(&[1, 2, 3]);
        assert!(c.replace(project(2, "changed")));
        assert_eq!(c.as_slice()[1].title(), "changed");
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn replace_unknown_id_is_noop() {
        let mut c = collection(&[1]);
        let before = c.clone();
        assert!(!c.replace(project(9, "ghost")));
        assert_eq!(c, before);
    }

    #[test]
    fn remove_returns_removed_entry() {
        let mut c = collection(&[1, 2]);
        let removed = c.remove(&ProjectId::number(1)).unwrap();
        assert_eq!(removed.id, ProjectId::number(1));
        assert_eq!(ids(&c), vec![ProjectId::number(2)]);
        assert!(c.remove(&ProjectId::number(1)).is_none());
    }

    #[test]
    fn favorites_filters_in_order() {
        let mut c = collection(&[1, 2, 3]);
        c.replace(project(3, "c").with_favorite(true));
        c.replace(project(1, "a").with_favorite(true));
        let favs: Vec<_> = c.favorites().into_iter().map(|p| p.id.clone()).collect();
        assert_eq!(favs, vec![ProjectId::number(1), ProjectId::number(3)]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let c = ProjectCollection::from_vec(vec![
            project(1, "Website Redesign"),
            project(2, "Mobile App"),
            project(3, "web scraper"),
        ])
        .unwrap();

        let hits: Vec<_> = c.search("WEB").into_iter().map(|p| p.id.clone()).collect();
        assert_eq!(hits, vec![ProjectId::number(1), ProjectId::number(3)]);
    }

    #[test]
    fn blank_search_matches_everything() {
        let c = collection(&[1, 2]);
        assert_eq!(c.search("   ").len(), 2);
    }

    proptest! {
        #[test]
        fn remove_leaves_no_entry_with_id(
            raw in proptest::collection::hash_set(0u64..1000, 0..20),
            target in 0u64..1000,
        ) {
            let id_list: Vec<u64> = raw.into_iter().collect();
            let mut c = collection(&id_list);
            let before = c.len();
            let target = ProjectId::number(target);
            let removed = c.remove(&target);

            prop_assert!(!c.contains(&target));
            prop_assert_eq!(c.len(), before - usize::from(removed.is_some()));
        }

        #[test]
        fn ids_stay_unique_under_pushes(pushes in proptest::collection::vec(0u64..50, 0..40)) {
            let mut c = ProjectCollection::new();
            for id in pushes {
                let _ = c.push(project(id, "p"));
            }
            let unique: HashSet<_> = c.iter().map(|p| p.id.clone()).collect();
            prop_assert_eq!(unique.len(), c.len());
        }

        #[test]
        fn replace_preserves_order_and_length(
            raw in proptest::collection::hash_set(0u64..100, 1..20),
            pick in any::<proptest::sample::Index>(),
        ) {
            let id_list: Vec<u64> = raw.into_iter().collect();
            let mut c = collection(&id_list);
            let before = ids(&c);
            let target = id_list[pick.index(id_list.len())];

            prop_assert!(c.replace(project(target, "new")));
            prop_assert_eq!(ids(&c), before);
            prop_assert_eq!(c.get(&ProjectId::number(target)).unwrap().title(), "new");
        }
    }
}
