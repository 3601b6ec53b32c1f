use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
enum XtaskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Environment variable not set: {0}")]
    VarError(#[from] std::env::VarError),
    #[error("Unknown backend: {0}. Supported: sqlite, postgres")]
    UnknownBackend(String),
    #[error("Failed to read migrations directory: {0}")]
    ReadMigrations(String),
    #[error("No migration files found in {0}")]
    NoMigrations(String),
    #[error("Failed to read migration {0}: {1}")]
    ReadMigration(String, std::io::Error),
    #[error("Failed to run {0}. Is it installed?")]
    ToolNotFound(&'static str),
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
    #[error("Failed to get parent directory")]
    NoParentDir,
    #[error("Migrations differ between backends: {0}")]
    MigrationsDiverged(String),
}

type Result<T> = std::result::Result<T, XtaskError>;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for the packlist workspace")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a development database with every migration applied
    SetupDb {
        /// Storage backend to set up (sqlite, postgres)
        #[arg(default_value = "sqlite")]
        backend: String,
    },
    /// Check that both backends ship the same migration versions
    CheckMigrations,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::SetupDb { backend } => setup_db(&backend),
        Commands::CheckMigrations => check_migrations(),
    }
}

fn setup_db(backend: &str) -> Result<()> {
    match backend {
        "sqlite" => setup_sqlite(),
        "postgres" => setup_postgres(),
        _ => Err(XtaskError::UnknownBackend(backend.to_string())),
    }
}

fn setup_sqlite() -> Result<()> {
    println!("🔧 Setting up SQLite development database...");

    let project_root = project_root()?;
    let db_path = project_root.join("crates/packlist-store-sqlite/dev.db");
    let migration_dir = project_root.join("crates/packlist-store-sqlite/migrations");

    // Remove old database if it exists
    if db_path.exists() {
        std::fs::remove_file(&db_path)?;
    }

    for path in migration_files(&migration_dir)? {
        println!("  Applying: {}", file_name(&path));

        let sql = std::fs::read_to_string(&path)
            .map_err(|e| XtaskError::ReadMigration(path.display().to_string(), e))?;

        let status = Command::new("sqlite3")
            .arg(&db_path)
            .arg(&sql)
            .status()
            .map_err(|_| XtaskError::ToolNotFound("sqlite3"))?;

        if !status.success() {
            return Err(XtaskError::MigrationFailed(path.display().to_string()));
        }
    }

    println!("✓ SQLite database created at: {}", db_path.display());
    println!();
    println!("Run the server against it with:");
    println!(
        "  cargo run -p packlist-server -- --database-url sqlite://{} serve",
        db_path.display()
    );

    Ok(())
}

fn setup_postgres() -> Result<()> {
    println!("🔧 Applying PostgreSQL migrations...");

    let database_url = std::env::var("DATABASE_URL")?;
    let migration_dir = project_root()?.join("crates/packlist-store-postgres/migrations");

    for path in migration_files(&migration_dir)? {
        println!("  Applying: {}", file_name(&path));

        let status = Command::new("psql")
            .arg(&database_url)
            .args(["-v", "ON_ERROR_STOP=1", "-q", "-f"])
            .arg(&path)
            .status()
            .map_err(|_| XtaskError::ToolNotFound("psql"))?;

        if !status.success() {
            return Err(XtaskError::MigrationFailed(path.display().to_string()));
        }
    }

    println!("✓ PostgreSQL schema applied");
    println!("Note: the server tracks applied versions itself; use this only on a fresh database.");

    Ok(())
}

fn check_migrations() -> Result<()> {
    let project_root = project_root()?;
    let names = |backend: &str| -> Result<Vec<String>> {
        let dir = project_root.join(format!("crates/packlist-store-{backend}/migrations"));
        Ok(migration_files(&dir)?.iter().map(|p| file_name(p)).collect())
    };

    let sqlite = names("sqlite")?;
    let postgres = names("postgres")?;

    let only_sqlite: Vec<_> = sqlite.iter().filter(|n| !postgres.contains(n)).collect();
    let only_postgres: Vec<_> = postgres.iter().filter(|n| !sqlite.contains(n)).collect();

    if !only_sqlite.is_empty() || !only_postgres.is_empty() {
        return Err(XtaskError::MigrationsDiverged(format!(
            "sqlite only: {only_sqlite:?}, postgres only: {only_postgres:?}"
        )));
    }

    println!("✓ {} migration(s) present in both backends", sqlite.len());
    Ok(())
}

/// `.sql` files in a migrations directory, in version order.
fn migration_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut migrations: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| XtaskError::ReadMigrations(e.to_string()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|ext| ext == "sql").unwrap_or(false))
        .collect();
    migrations.sort();

    if migrations.is_empty() {
        return Err(XtaskError::NoMigrations(dir.display().to_string()));
    }
    Ok(migrations)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn project_root() -> Result<PathBuf> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")?;
    let xtask_dir = PathBuf::from(manifest_dir);
    let parent = xtask_dir.parent().ok_or(XtaskError::NoParentDir)?;
    Ok(parent.to_path_buf())
}
