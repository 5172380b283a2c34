use actix_web::{error::JsonPayloadError, web};
use std::sync::Arc;

use crate::application::auth::AuthenticateUserUseCase;
use crate::application::invoice::{ListInvoiceTemplatesUseCase, OpenInvoiceUseCase};
use crate::domain::company::CompanyService;
use crate::domain::invoice::InvoiceService;
use crate::domain::product::ProductService;
use crate::domain::remit::RemitInformationService;

use super::errors::ApiError;
use super::handlers::session::SessionSettings;
use super::handlers::{companies, documents, invoices, products, remit, session};
use super::middleware::BasicAuthMiddleware;

/// Dependencies for all HTTP routes
#[derive(Clone)]
pub struct RouteDependencies {
  pub company_service: Arc<CompanyService>,
  pub product_service: Arc<ProductService>,
  pub remit_service: Arc<RemitInformationService>,
  pub invoice_service: Arc<InvoiceService>,
  pub open_invoice_use_case: Arc<OpenInvoiceUseCase>,
  pub list_invoice_templates_use_case: Arc<ListInvoiceTemplatesUseCase>,
  pub authenticate_use_case: Arc<AuthenticateUserUseCase>,
  pub session: SessionSettings,
}

fn json_error_handler(err: JsonPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
  ApiError::Validation(format!("Invalid JSON body: {}", err)).into()
}

/// Configure the whole application
///
/// # Routes
///
/// - GET /health - Liveness check
/// - GET / - Front-end page
/// - POST /api/logout - Forces the browser to drop Basic credentials
/// - /api/companies, /api/products, /api/remit, /api/invoices - CRUD
///   (GET and POST on the collection, GET, PUT and DELETE on `/{id}`)
/// - GET /api/invoices/{id}/open?template=name - Rendered invoice document
/// - GET /api/list_invoice_templates - Available invoice templates
///
/// Everything under `/api` except logout requires Basic credentials.
pub fn configure_routes(cfg: &mut web::ServiceConfig, deps: RouteDependencies) {
  let realm = deps.session.realm.clone();

  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::Data::new(deps.company_service))
    .app_data(web::Data::new(deps.product_service))
    .app_data(web::Data::new(deps.remit_service))
    .app_data(web::Data::new(deps.invoice_service))
    .app_data(web::Data::new(deps.open_invoice_use_case))
    .app_data(web::Data::new(deps.list_invoice_templates_use_case))
    .app_data(web::Data::new(deps.session))
    .route("/health", web::get().to(session::health_handler))
    .route("/", web::get().to(session::index_handler))
    // Registered ahead of the protected scope so it is reachable without credentials
    .route("/api/logout", web::post().to(session::logout_handler))
    .service(
      web::scope("/api")
        .wrap(BasicAuthMiddleware::new(deps.authenticate_use_case, realm))
        .service(
          web::resource("/companies")
            .route(web::get().to(companies::list_companies_handler))
            .route(web::post().to(companies::create_company_handler)),
        )
        .service(
          web::resource("/companies/{id}")
            .route(web::get().to(companies::get_company_handler))
            .route(web::put().to(companies::update_company_handler))
            .route(web::delete().to(companies::delete_company_handler)),
        )
        .service(
          web::resource("/products")
            .route(web::get().to(products::list_products_handler))
            .route(web::post().to(products::create_product_handler)),
        )
        .service(
          web::resource("/products/{id}")
            .route(web::get().to(products::get_product_handler))
            .route(web::put().to(products::update_product_handler))
            .route(web::delete().to(products::delete_product_handler)),
        )
        .service(
          web::resource("/remit")
            .route(web::get().to(remit::list_remit_informations_handler))
            .route(web::post().to(remit::create_remit_information_handler)),
        )
        .service(
          web::resource("/remit/{id}")
            .route(web::get().to(remit::get_remit_information_handler))
            .route(web::put().to(remit::update_remit_information_handler))
            .route(web::delete().to(remit::delete_remit_information_handler)),
        )
        .service(
          web::resource("/invoices")
            .route(web::get().to(invoices::list_invoices_handler))
            .route(web::post().to(invoices::create_invoice_handler)),
        )
        .service(
          web::resource("/invoices/{id}")
            .route(web::get().to(invoices::get_invoice_handler))
            .route(web::put().to(invoices::update_invoice_handler))
            .route(web::delete().to(invoices::delete_invoice_handler)),
        )
        .route(
          "/invoices/{id}/open",
          web::get().to(documents::open_invoice_handler),
        )
        .route(
          "/list_invoice_templates",
          web::get().to(documents::list_invoice_templates_handler),
        ),
    );
}
