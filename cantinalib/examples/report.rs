use cantinalib::{
    formats::{csv::Csv, json::Json},
    traits::{ReadRecords, WriteReport},
    BillingCalculator,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: счета в CSV (stdin) -> отчёт в JSON (stdout) на сегодняшнюю дату
    let records = Csv::read(std::io::BufReader::new(std::io::stdin()))?;
    let today = chrono::Local::now().date_naive();
    let rows = BillingCalculator::default().summarize_all(&records, today);
    Json::write_report(std::io::stdout(), &rows)?;
    Ok(())
}
