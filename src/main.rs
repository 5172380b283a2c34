use actix_web::{App, HttpServer, middleware::Logger};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tinycrm::{
  adapters::http::{RequestIdMiddleware, configure_routes},
  application::auth::AddUserCommand,
  infrastructure::{config::Config, persistence::sqlite},
  startup::AppDependencies,
};

#[derive(Debug, Parser)]
#[command(name = "tinycrm", version, about = "Small business records and invoicing backend")]
struct Cli {
  /// Override `server.port` from the configuration
  #[arg(long, global = true)]
  port: Option<u16>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Run the HTTP server (default)
  Serve,
  /// Create an account allowed to call the API
  Adduser { username: String, password: String },
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tinycrm=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let cli = Cli::parse();

  let mut config = Config::load().context("Failed to load configuration")?;
  if let Some(port) = cli.port {
    config.server.port = port;
  }
  tracing::info!("Configuration loaded successfully");

  tracing::info!("Connecting to database: {}", config.database.url);
  let pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    sqlite::connect(&config.database),
  )
  .await
  .with_context(|| {
    format!(
      "Database connection timed out after {} seconds",
      config.database.connect_timeout_seconds
    )
  })?
  .with_context(|| format!("Could not open database at {}", config.database.url))?;

  tracing::info!("Running database migrations");
  sqlite::run_migrations(&pool)
    .await
    .context("Failed to run database migrations")?;

  let deps = AppDependencies::build(pool, &config).context("Failed to initialise services")?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Adduser { username, password } => {
      let response = deps
        .add_user_use_case
        .execute(AddUserCommand { username, password })
        .await
        .context("Failed to add user")?;
      tracing::info!(user_id = response.user_id, "User {} added", response.username);
      Ok(())
    }
    Command::Serve => serve(config, deps).await,
  }
}

async fn serve(config: Config, deps: AppDependencies) -> anyhow::Result<()> {
  let host = config.server.host.clone();
  let port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", host, port);

  HttpServer::new(move || {
    let routes = deps.routes();
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .configure(move |cfg| configure_routes(cfg, routes))
  })
  .bind((host.as_str(), port))
  .with_context(|| format!("Failed to bind {}:{}", host, port))?
  .run()
  .await
  .context("HTTP server failed")
}
