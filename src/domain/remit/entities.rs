use serde::Serialize;

/// Named set of payment instructions printed on invoices (bank, account, PIX key...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemitInformation {
  pub id: i64,
  pub name: String,
  pub lines: Vec<RemitInformationLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemitInformationLine {
  pub id: i64,
  pub key: String,
  pub value: String,
  pub remit_information_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemitInformationData {
  pub name: String,
  pub lines: Vec<RemitLineData>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemitLineData {
  pub key: String,
  pub value: String,
}
