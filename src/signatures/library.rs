use crate::signatures::builtin::builtin_patterns;
use crate::signatures::error::CatalogError;
use crate::signatures::pattern::SignaturePattern;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignatureLibrary {
    patterns: Vec<SignaturePattern>,
    index: BTreeMap<String, usize>,
}

impl SignatureLibrary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        let mut library = Self::empty();
        for pattern in builtin_patterns()? {
            library.register(pattern)?;
        }
        Ok(library)
    }

    pub fn register(&mut self, pattern: SignaturePattern) -> Result<(), CatalogError> {
        if self.index.contains_key(pattern.id.as_str()) {
            return Err(CatalogError::Duplicate {
                id: pattern.id.to_string(),
            });
        }
        self.index
            .insert(pattern.id.as_str().to_string(), self.patterns.len());
        self.patterns.push(pattern);
        Ok(())
    }

    pub fn patterns(&self) -> &[SignaturePattern] {
        &self.patterns
    }

    pub fn get(&self, id: &str) -> Option<&SignaturePattern> {
        self.index.get(id).map(|position| &self.patterns[*position])
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
