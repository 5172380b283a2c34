#![allow(dead_code)]

use base64::{Engine, engine::general_purpose::STANDARD};
use tempfile::TempDir;

use tinycrm::application::auth::AddUserCommand;
use tinycrm::infrastructure::config::{
  AuthConfig, Config, DatabaseConfig, ServerConfig, TemplatesConfig,
};
use tinycrm::infrastructure::persistence::sqlite;
use tinycrm::startup::AppDependencies;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "correct horse battery staple";

pub const INVOICE_TEMPLATE: &str =
  "<h1>{{ repr }}</h1><p>{{ invoice.client.name }}</p><p>{{ due_month }}</p><p>{{ identification }}</p>";

/// Application wired against a private in-memory database, with invoice
/// templates and the front-end page in a temporary directory.
pub struct TestContext {
  pub deps: AppDependencies,
  pub dir: TempDir,
}

impl TestContext {
  pub async fn new() -> Self {
    let dir = tempfile::tempdir().expect("temp dir");
    let invoices_dir = dir.path().join("invoices");
    std::fs::create_dir(&invoices_dir).expect("invoices dir");
    std::fs::write(invoices_dir.join("default.html"), INVOICE_TEMPLATE).expect("template");
    std::fs::write(invoices_dir.join("alternative.html"), "{{ total }}").expect("template");
    std::fs::create_dir(invoices_dir.join("partials")).expect("partials dir");
    std::fs::write(dir.path().join("index.html"), "<title>Tiny CRM</title>").expect("index");

    let config = Config {
      server: ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
      },
      database: DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connect_timeout_seconds: 5,
        acquire_timeout_seconds: 3,
      },
      templates: TemplatesConfig {
        index_path: dir.path().join("index.html").display().to_string(),
        invoices_dir: invoices_dir.display().to_string(),
      },
      auth: AuthConfig::default(),
    };

    let pool = sqlite::connect_in_memory().await.expect("in-memory pool");
    sqlite::run_migrations(&pool).await.expect("migrations");

    let deps = AppDependencies::build(pool, &config).expect("dependencies");
    deps
      .add_user_use_case
      .execute(AddUserCommand {
        username: USERNAME.to_string(),
        password: PASSWORD.to_string(),
      })
      .await
      .expect("add user");

    Self { deps, dir }
  }

  pub fn auth(&self) -> (&'static str, String) {
    basic_auth(USERNAME, PASSWORD)
  }
}

pub fn basic_auth(username: &str, password: &str) -> (&'static str, String) {
  (
    "Authorization",
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password))),
  )
}

/// Initialise the full application for one test
macro_rules! init_app {
  ($ctx:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .wrap(tinycrm::adapters::http::RequestIdMiddleware::new())
        .configure(|cfg| tinycrm::adapters::http::configure_routes(cfg, $ctx.deps.routes())),
    )
    .await
  };
}
