use serde::Serialize;

/// Company that issues or receives invoices
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Company {
  pub id: i64,
  pub name: String,
  /// Tax identification document, e.g. a CNPJ
  pub document: String,
  pub address: String,
}

/// Full set of company fields supplied on create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyData {
  pub name: String,
  pub document: String,
  pub address: String,
}

#[cfg(test)]
impl Company {
  pub fn from_data(id: i64, data: CompanyData) -> Self {
    Self {
      id,
      name: data.name,
      document: data.document,
      address: data.address,
    }
  }
}
