//! Exhaustive containers keyed by the closed enums in [`super::domain`].
//!
//! Content is stored one field per key, so a catalog that deserializes is
//! guaranteed to cover every locale, category and response kind.

use serde::{Deserialize, Serialize};

use super::domain::{CategoryKey, Locale, ResponseKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerLocale<T> {
    pub en: T,
    pub es: T,
}

impl<T> PerLocale<T> {
    pub fn from_fn(mut build: impl FnMut(Locale) -> T) -> Self {
        Self {
            en: build(Locale::En),
            es: build(Locale::Es),
        }
    }

    pub fn get(&self, locale: Locale) -> &T {
        match locale {
            Locale::En => &self.en,
            Locale::Es => &self.es,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Locale, &T)> {
        Locale::ordered()
            .into_iter()
            .map(move |locale| (locale, self.get(locale)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerCategory<T> {
    pub leadership: T,
    pub employee_empowerment: T,
    pub communication: T,
    pub recognition: T,
    pub development: T,
}

impl<T> PerCategory<T> {
    pub fn from_fn(mut build: impl FnMut(CategoryKey) -> T) -> Self {
        Self {
            leadership: build(CategoryKey::Leadership),
            employee_empowerment: build(CategoryKey::EmployeeEmpowerment),
            communication: build(CategoryKey::Communication),
            recognition: build(CategoryKey::Recognition),
            development: build(CategoryKey::Development),
        }
    }

    pub fn get(&self, category: CategoryKey) -> &T {
        match category {
            CategoryKey::Leadership => &self.leadership,
            CategoryKey::EmployeeEmpowerment => &self.employee_empowerment,
            CategoryKey::Communication => &self.communication,
            CategoryKey::Recognition => &self.recognition,
            CategoryKey::Development => &self.development,
        }
    }

    pub fn get_mut(&mut self, category: CategoryKey) -> &mut T {
        match category {
            CategoryKey::Leadership => &mut self.leadership,
            CategoryKey::EmployeeEmpowerment => &mut self.employee_empowerment,
            CategoryKey::Communication => &mut self.communication,
            CategoryKey::Recognition => &mut self.recognition,
            CategoryKey::Development => &mut self.development,
        }
    }

    /// Iterates in category declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryKey, &T)> {
        CategoryKey::ordered()
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerKind<T> {
    pub percentage: T,
    pub count: T,
    pub frequency: T,
}

impl<T> PerKind<T> {
    pub fn get(&self, kind: ResponseKind) -> &T {
        match kind {
            ResponseKind::Percentage => &self.percentage,
            ResponseKind::Count => &self.count,
            ResponseKind::Frequency => &self.frequency,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResponseKind, &T)> {
        ResponseKind::ordered()
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }
}
