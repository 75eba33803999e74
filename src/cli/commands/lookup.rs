use crate::config::Config;
use crate::models::GeoResult;
use crate::state::SharedState;

pub async fn cmd_lookup(config: Config, address: &str, json: bool) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    let found = match state.lookup_service.lookup(address).await {
        Ok(found) => found,
        Err(e) => {
            println!("{}", e.user_message());
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&found.results)?);
        return Ok(());
    }

    println!("Results for \"{}\":", found.address);
    for (index, result) in found.results.iter().enumerate() {
        print_result(index + 1, result);
    }

    Ok(())
}

fn print_result(number: usize, result: &GeoResult) {
    println!("{:-<70}", "");
    println!("{number}. {}", result.formatted_address);

    if !result.district.is_empty() {
        println!("   District:    {}", result.district);
    }
    if !result.street.is_empty() {
        println!("   Street:      {}", result.street);
    }
    if !result.house.is_empty() {
        println!("   House:       {}", result.house);
    }
    println!("   Coordinates: {}", result.coordinates);

    if result.nearby_stations.is_empty() {
        println!("   No metro stations nearby");
    } else {
        println!("   Nearby metro:");
        for station in &result.nearby_stations {
            println!("     • {} - {}", station.name, station.description);
        }
    }
}
