//! One table encoded in every orientation.
//!
//! Run with: cargo run --example tabular

use objson::{
    to_string, to_string_with_options, DataFrame, EncodeOptions, Index, NdArray, Orient, Series,
    Value,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let frame = DataFrame::from_columns(vec![
        ("price", vec![9.99, 24.5, 3.0]),
        ("weight", vec![0.25, 1.75, f64::NAN]),
    ])?
    .with_index(Index::new(vec![
        Value::from("apple"),
        Value::from("melon"),
        Value::from("plum"),
    ]));
    let frame = Value::from(frame);

    for orient in [
        Orient::Split,
        Orient::Records,
        Orient::Index,
        Orient::Columns,
        Orient::Values,
    ] {
        let options = EncodeOptions::new().with_orient(orient);
        println!("{:>8}: {}", orient.as_str(), to_string_with_options(&frame, options)?);
    }

    let series = Series::new(NdArray::from_vec(vec![3i64, 1, 4])).with_name("digits");
    println!("\nseries: {}", to_string(&Value::from(series))?);

    let matrix = NdArray::from_rows(vec![vec![1i64, 2, 3], vec![4, 5, 6]])?;
    println!("matrix: {}", to_string(&Value::from(matrix.clone()))?);
    println!("transposed: {}", to_string(&Value::from(matrix.transpose()))?);

    Ok(())
}
