use crate::config::Config;
use tokio_postgres::Client;
use tokio_postgres::Error as E;
use tokio_postgres::NoTls;

/// Open a connection to the named database and drive it from a background
/// task. The importer targets the maintenance database first, so the database
/// name is a parameter rather than always coming from Config.
pub async fn connect(config: &Config, database: &str) -> Result<Client, E> {
    log::info!("connecting to database {}", database);
    let mut pg = tokio_postgres::Config::default();
    pg.host(&config.host)
        .port(config.port)
        .user(&config.user)
        .dbname(database);
    if let Some(ref password) = config.password {
        pg.password(password);
    }
    let (client, connection) = pg.connect(NoTls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    Ok(client)
}
