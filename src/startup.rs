//! Object graph shared by the server and the command line

use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::http::{RouteDependencies, SessionSettings};
use crate::application::auth::{AddUserUseCase, AuthenticateUserUseCase};
use crate::application::invoice::{ListInvoiceTemplatesUseCase, OpenInvoiceUseCase};
use crate::domain::auth::{AuthError, AuthService};
use crate::domain::company::CompanyService;
use crate::domain::invoice::{DocumentRenderer, InvoiceService};
use crate::domain::product::ProductService;
use crate::domain::remit::RemitInformationService;
use crate::infrastructure::config::Config;
use crate::infrastructure::documents::TeraDocumentRenderer;
use crate::infrastructure::persistence::sqlite::{
  SqliteCompanyRepository, SqliteInvoiceRepository, SqliteProductRepository,
  SqliteRemitInformationRepository, SqliteUserRepository,
};
use crate::infrastructure::security::Argon2PasswordHasher;

#[derive(Clone)]
pub struct AppDependencies {
  pub company_service: Arc<CompanyService>,
  pub product_service: Arc<ProductService>,
  pub remit_service: Arc<RemitInformationService>,
  pub invoice_service: Arc<InvoiceService>,
  pub add_user_use_case: Arc<AddUserUseCase>,
  pub authenticate_use_case: Arc<AuthenticateUserUseCase>,
  pub open_invoice_use_case: Arc<OpenInvoiceUseCase>,
  pub list_invoice_templates_use_case: Arc<ListInvoiceTemplatesUseCase>,
  pub session: SessionSettings,
}

impl AppDependencies {
  /// Wire repositories, services and use cases on top of an open pool
  pub fn build(pool: SqlitePool, config: &Config) -> Result<Self, AuthError> {
    let company_repo = Arc::new(SqliteCompanyRepository::new(pool.clone()));
    let product_repo = Arc::new(SqliteProductRepository::new(pool.clone()));
    let remit_repo = Arc::new(SqliteRemitInformationRepository::new(pool.clone()));
    let invoice_repo = Arc::new(SqliteInvoiceRepository::new(pool.clone()));
    let user_repo = Arc::new(SqliteUserRepository::new(pool));

    let password_hasher = Arc::new(Argon2PasswordHasher::new()?);
    let renderer: Arc<dyn DocumentRenderer> =
      Arc::new(TeraDocumentRenderer::new(&config.templates.invoices_dir));

    let auth_service = Arc::new(AuthService::new(user_repo, password_hasher));
    let invoice_service = Arc::new(InvoiceService::new(invoice_repo));

    Ok(Self {
      company_service: Arc::new(CompanyService::new(company_repo)),
      product_service: Arc::new(ProductService::new(product_repo)),
      remit_service: Arc::new(RemitInformationService::new(remit_repo)),
      add_user_use_case: Arc::new(AddUserUseCase::new(auth_service.clone())),
      authenticate_use_case: Arc::new(AuthenticateUserUseCase::new(auth_service)),
      open_invoice_use_case: Arc::new(OpenInvoiceUseCase::new(
        invoice_service.clone(),
        renderer.clone(),
      )),
      list_invoice_templates_use_case: Arc::new(ListInvoiceTemplatesUseCase::new(renderer)),
      invoice_service,
      session: SessionSettings {
        realm: config.auth.realm.clone(),
        index_path: PathBuf::from(&config.templates.index_path),
      },
    })
  }

  pub fn routes(&self) -> RouteDependencies {
    RouteDependencies {
      company_service: self.company_service.clone(),
      product_service: self.product_service.clone(),
      remit_service: self.remit_service.clone(),
      invoice_service: self.invoice_service.clone(),
      open_invoice_use_case: self.open_invoice_use_case.clone(),
      list_invoice_templates_use_case: self.list_invoice_templates_use_case.clone(),
      authenticate_use_case: self.authenticate_use_case.clone(),
      session: self.session.clone(),
    }
  }
}
