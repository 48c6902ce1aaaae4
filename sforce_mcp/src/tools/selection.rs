use crate::registry::RegistryError;

/// Which tools to expose.
///
/// `enabled` restricts the set to the named tools; `disabled` removes tools
/// from whatever remains. Names are trimmed and blank entries ignored, so a
/// comma-separated environment value can be passed through as split.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSelection {
    pub enabled: Option<Vec<String>>,
    pub disabled: Vec<String>,
}

impl ToolSelection {
    /// Every tool.
    pub fn all() -> Self {
        Self::default()
    }

    /// Only the named tools.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: Some(names.into_iter().map(Into::into).collect()),
            disabled: Vec::new(),
        }
    }

    /// Removes the named tools from the selection.
    pub fn without<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled.extend(names.into_iter().map(Into::into));
        self
    }

    /// Picks the selected names out of `available`, keeping its order.
    pub fn resolve<'a>(&self, available: &[&'a str]) -> Result<Vec<&'a str>, RegistryError> {
        let enabled = self.enabled.as_deref().map(normalize);
        let disabled = normalize(&self.disabled);

        for name in enabled.iter().flatten().chain(disabled.iter()) {
            if !available.contains(&name.as_str()) {
                return Err(RegistryError::UnknownSelection(name.clone()));
            }
        }

        let selected: Vec<&'a str> = available
            .iter()
            .copied()
            .filter(|name| {
                enabled
                    .as_ref()
                    .is_none_or(|enabled| enabled.iter().any(|e| e == name))
            })
            .filter(|name| !disabled.iter().any(|d| d == name))
            .collect();

        if selected.is_empty() {
            return Err(RegistryError::EmptySelection);
        }
        Ok(selected)
    }
}

fn normalize(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
