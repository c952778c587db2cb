//! Command handlers

use std::path::{Path, PathBuf};

use agridatum_client::{
    ClientConfig, Credentials, HarvestClient, HarvestForm, HarvestRecord, LoggedIn, RecordFilter,
    RecordId, RecordStore, validate_pin,
};
use anyhow::{Context, bail};

use crate::cli::{Command, ExportArgs, FarmerArgs, RecordsArgs, SubmitArgs, VerifyArgs};

pub async fn run(command: Command, config: ClientConfig) -> anyhow::Result<()> {
    match command {
        Command::Derive(farmer) => derive(&farmer),
        Command::Login(farmer) => login_summary(config, &farmer).await,
        Command::Submit(args) => submit(config, args).await,
        Command::Records(args) => records(config, args).await,
        Command::Verify(args) => verify(config, args).await,
        Command::Export(args) => export(config, args).await,
    }
}

async fn login(config: ClientConfig, farmer: &FarmerArgs) -> anyhow::Result<HarvestClient<LoggedIn>> {
    let client = HarvestClient::new(config)?;
    Ok(client.login(farmer.credentials()).await?)
}

fn derive(farmer: &FarmerArgs) -> anyhow::Result<()> {
    let credentials = farmer.credentials();
    validate_pin(credentials.pin())?;
    println!("{}", credentials.derive().farmer_id);
    Ok(())
}

async fn login_summary(config: ClientConfig, farmer: &FarmerArgs) -> anyhow::Result<()> {
    let client = login(config, farmer).await?;
    let session = client.current_farmer()?;
    println!("Farmer:  {}", session.farmer_id);
    println!("Phone:   {}", session.phone_number);
    println!("Records: {}", client.records().len());
    if let Some(latest) = client.records().iter().next() {
        println!("Latest:  {}", format_record(latest));
    }
    client.logout();
    Ok(())
}

async fn submit(config: ClientConfig, args: SubmitArgs) -> anyhow::Result<()> {
    let mut client = login(config, &args.farmer).await?;
    let form = HarvestForm::new(args.farmer.credentials(), args.plot, args.crop, args.weight);

    let outcome = client.submit(&form).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    if !outcome.success {
        bail!(outcome.error.unwrap_or_else(|| "Submission failed".into()));
    }
    Ok(())
}

async fn records(config: ClientConfig, args: RecordsArgs) -> anyhow::Result<()> {
    let filter = RecordFilter {
        crop_type: args.crop,
        start_date: args.start_date,
        end_date: args.end_date,
        limit: args.limit,
        offset: args.offset,
    };
    let client = HarvestClient::new(config)?;

    let records = match (args.phone, args.pin) {
        (Some(phone), Some(pin)) => {
            let credentials = Credentials::new(phone, pin);
            validate_pin(credentials.pin())?;
            let farmer_id = credentials.derive().farmer_id;
            client
                .api()
                .records_by_farmer(&farmer_id, filter.limit, filter.offset)
                .await?
                .into_iter()
                .filter(|record| matches_filter(record, &filter))
                .collect()
        }
        _ => client.api().all_records(&filter).await?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No harvest records yet.");
    } else {
        for record in &records {
            println!("{}", format_record(record));
        }
    }
    Ok(())
}

async fn verify(config: ClientConfig, args: VerifyArgs) -> anyhow::Result<()> {
    let client = HarvestClient::new(config)?;
    let response = client
        .api()
        .verify_harvest(args.record_id.map(RecordId::from), args.tx_hash.as_deref())
        .await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn export(config: ClientConfig, args: ExportArgs) -> anyhow::Result<()> {
    let client = login(config, &args.farmer).await?;
    let path = args
        .out
        .unwrap_or_else(|| PathBuf::from(RecordStore::export_file_name(shared::util::today())));
    write_export(client.records(), &path)?;
    println!("Exported {} records to {}", client.records().len(), path.display());
    Ok(())
}

fn write_export(store: &RecordStore, path: &Path) -> anyhow::Result<()> {
    let json = store.export_json()?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {} records to {}", store.len(), path.display());
    Ok(())
}

/// Crop and date filters, applied locally to the per-farmer listing.
///
/// Crops compare case-insensitively; dates compare on the `YYYY-MM-DD` prefix of the timestamp.
fn matches_filter(record: &HarvestRecord, filter: &RecordFilter) -> bool {
    let day = record.timestamp.get(..10).unwrap_or(record.timestamp.as_str());
    filter
        .crop_type
        .as_deref()
        .is_none_or(|crop| record.crop_type.eq_ignore_ascii_case(crop))
        && filter.start_date.as_deref().is_none_or(|start| day >= start)
        && filter.end_date.as_deref().is_none_or(|end| day <= end)
}

/// One line per record: id, time, crop, weight, plot, chain status
fn format_record(record: &HarvestRecord) -> String {
    let chain = match (&record.transaction_hash, record.indexed_on_chain) {
        (Some(tx), Some(true)) => format!("on chain {}", tx),
        (Some(tx), _) => format!("pending {}", tx),
        (None, _) => "not on chain".to_string(),
    };
    format!(
        "#{:<6} {}  {:<10} {:>9.2} kg  {}  [{}]",
        record.id, record.timestamp, record.crop_type, record.weight_kg, record.plot_location, chain
    )
}
