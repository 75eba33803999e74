use crate::config::Config;
use crate::db::Store;

pub async fn cmd_history(config: &Config, limit: u64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let records = store.list_searched_addresses(Some(limit)).await?;

    if records.is_empty() {
        println!("No addresses searched yet.");
        return Ok(());
    }

    let total = store.searched_address_count().await?;
    println!("Searched addresses ({} of {}):", records.len(), total);
    println!("{:-<70}", "");

    for record in records {
        println!("{:>4}. {}", record.id, record.normalized_address);
        println!("      first seen {}", record.first_seen_at);
    }

    Ok(())
}
