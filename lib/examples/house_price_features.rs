//! Feature Table Example: Ames Housing
//!
//! This example walks through building regression features from a small
//! hand-written slice of the Ames Housing data:
//! - Classifying columns with a custom schema
//! - Constant-zero imputation of numeric columns
//! - Ordinal ranks and one-hot indicators
//! - Applying the training vocabulary to an inference table
//! - Saving and reloading the fitted pipeline
//!
//! Run with: cargo run --example house_price_features

use housing_features::{
    Cell, Column, FeaturePipeline, FittedFeaturePipeline, FittedTransformer, Schema, Table,
    Transformer,
};
use std::error::Error;

fn text(values: &[&str]) -> Vec<Cell> {
    values
        .iter()
        .map(|&v| if v == "NA" { Cell::Missing } else { Cell::from(v) })
        .collect()
}

fn print_table(title: &str, table: &Table) {
    println!("{} ({} rows x {} columns)", title, table.n_rows(), table.n_cols());
    println!("  {}", table.column_names().join(" | "));
    for row in 0..table.n_rows() {
        let cells: Vec<String> = table
            .columns()
            .iter()
            .map(|c| c.cells()[row].to_string())
            .collect();
        println!("  {}", cells.join(" | "));
    }
    println!();
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Ames Housing Feature Table ===\n");

    // 1. A schema restricted to a handful of columns
    let schema = Schema::new("Id", "SalePrice")
        .with_numeric(&["LotArea", "GarageArea"])
        .with_ordinal(&["KitchenQual"])
        .with_nominal(&["Street", "YrSold"]);
    println!("Schema:\n{}\n", schema.to_json_string()?);

    // 2. Training data, with a missing garage and a missing kitchen grade
    let train = Table::new(vec![
        Column::from_f64("Id", vec![1.0, 2.0, 3.0, 4.0]),
        Column::from_f64("LotArea", vec![8450.0, 9600.0, 11250.0, 9550.0]),
        Column::from_f64("GarageArea", vec![548.0, f64::NAN, 608.0, 642.0]),
        Column::new("KitchenQual", text(&["Gd", "TA", "Gd", "NA"])),
        Column::new("Street", text(&["Pave", "Pave", "Grvl", "Pave"])),
        Column::from_f64("YrSold", vec![2008.0, 2007.0, 2008.0, 2006.0]),
        Column::from_f64("SalePrice", vec![208500.0, 181500.0, 223500.0, 140000.0]),
    ])?;
    print_table("Raw training table", &train);

    // 3. Fit once on training data
    let fitted = FeaturePipeline::new(schema).fit(&train)?;
    println!("Feature columns: {:?}\n", fitted.feature_names());

    print_table("Training features", &fitted.complete_data(&train)?);

    // 4. Inference table: no target, one kitchen grade never seen in training
    let test = Table::new(vec![
        Column::from_f64("Id", vec![1461.0, 1462.0]),
        Column::from_f64("LotArea", vec![11622.0, 14267.0]),
        Column::from_f64("GarageArea", vec![730.0, 312.0]),
        Column::new("KitchenQual", text(&["TA", "Ex"])),
        Column::new("Street", text(&["Pave", "Pave"])),
        Column::from_f64("YrSold", vec![2010.0, 2008.0]),
    ])?;
    print_table("Test features", &fitted.complete_data(&test)?);

    // 5. Persist the fitted pipeline and reload it
    let path = std::env::temp_dir().join("house_price_features.bin");
    fitted.save_to_file(&path)?;
    let loaded = FittedFeaturePipeline::load_from_file(&path)?;
    let same = loaded.complete_data(&test)? == fitted.complete_data(&test)?;
    println!("Reloaded pipeline gives identical features: {}", same);
    std::fs::remove_file(&path)?;

    Ok(())
}
