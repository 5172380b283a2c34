use std::fmt;

use super::errors::DocumentError;

const MONTHS_PT: [&str; 12] = [
  "Janeiro",
  "Fevereiro",
  "Março",
  "Abril",
  "Maio",
  "Junho",
  "Julho",
  "Agosto",
  "Setembro",
  "Outubro",
  "Novembro",
  "Dezembro",
];

/// Portuguese month name for a zero-based month index (0 = January)
pub fn month_name_pt(month0: u32) -> &'static str {
  MONTHS_PT[(month0 % 12) as usize]
}

// Template Name - plain file name inside the invoice template directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateName(String);

impl TemplateName {
  pub fn new(value: impl Into<String>) -> Result<Self, DocumentError> {
    let value = value.into();
    let trimmed = value.trim();

    if trimmed.is_empty() {
      return Err(DocumentError::InvalidTemplateName(
        "template query parameter is required".to_string(),
      ));
    }
    if trimmed.contains(['/', '\\']) || trimmed.starts_with('.') {
      return Err(DocumentError::InvalidTemplateName(trimmed.to_string()));
    }

    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for TemplateName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_month_names() {
    assert_eq!(month_name_pt(0), "Janeiro");
    assert_eq!(month_name_pt(2), "Março");
    assert_eq!(month_name_pt(11), "Dezembro");
  }

  #[test]
  fn test_template_name_valid() {
    let name = TemplateName::new(" default.html ").unwrap();
    assert_eq!(name.value(), "default.html");
  }

  #[test]
  fn test_template_name_rejects_paths() {
    assert!(TemplateName::new("").is_err());
    assert!(TemplateName::new("../secrets.html").is_err());
    assert!(TemplateName::new("sub/dir.html").is_err());
    assert!(TemplateName::new("..\\win.html").is_err());
    assert!(TemplateName::new(".hidden").is_err());
  }
}
