use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes `rows` add operations spread over `customers` carts and 20 products.
pub fn generate_operations(path: &Path, rows: usize, customers: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["op", "customer", "product", "price", "quantity", "position"])?;

    for i in 0..rows {
        wtr.write_record([
            "add",
            &format!("C{}", i % customers),
            &format!("P{}", (i / customers) % 20),
            "0.01",
            "1",
            "",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
