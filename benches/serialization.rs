use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use objson::{
    to_buffer, to_string, to_string_with_options, value, DataFrame, EncodeOptions, Index,
    NdArray, Orient, Value,
};

fn user_record(i: i64) -> Value {
    value!({
        "id": i,
        "name": (format!("User {}", i)),
        "email": (format!("user{}@example.com", i)),
        "active": (i % 2 == 0),
        "score": (9.99 + i as f64)
    })
}

fn sample_frame(rows: usize, cols: usize) -> DataFrame {
    let data: Vec<Vec<f64>> = (0..rows)
        .map(|r| (0..cols).map(|c| (r * cols + c) as f64 * 0.25).collect())
        .collect();
    let columns = Index::new((0..cols).map(|c| Value::from(format!("col{}", c))).collect());
    DataFrame::new(NdArray::from_rows(data).unwrap())
        .unwrap()
        .with_columns(columns)
}

fn benchmark_encode_simple(c: &mut Criterion) {
    let user = user_record(123);

    c.bench_function("encode_simple_dict", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_encode_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_list");

    for size in [10, 50, 100, 500].iter() {
        let users = Value::List((0..*size).map(user_record).collect());

        group.bench_with_input(BenchmarkId::from_parameter(size), &users, |b, users| {
            b.iter(|| to_string(black_box(users)))
        });
    }
    group.finish();
}

fn benchmark_string_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_strings");

    let ascii = Value::from("This is a medium length string with some content");
    let unicode = Value::from("Ünïcödé text with emoji 😀 and <html> & quotes \"here\"");

    group.bench_function("ascii", |b| b.iter(|| to_string(black_box(&ascii))));
    group.bench_function("unicode_ensure_ascii", |b| {
        b.iter(|| to_string(black_box(&unicode)))
    });
    group.bench_function("unicode_raw", |b| {
        b.iter(|| {
            to_string_with_options(
                black_box(&unicode),
                EncodeOptions::new().with_ensure_ascii(false),
            )
        })
    });
    group.bench_function("unicode_html", |b| {
        b.iter(|| {
            to_string_with_options(
                black_box(&unicode),
                EncodeOptions::new().with_encode_html_chars(true),
            )
        })
    });

    group.finish();
}

fn benchmark_arrays(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrays");

    let ints = Value::from(NdArray::from_vec((0..1000).collect::<Vec<i64>>()));
    let floats = Value::from(NdArray::from_vec(
        (0..1000).map(|i| i as f64 * 1.5).collect::<Vec<f64>>(),
    ));
    let matrix = NdArray::from_rows(
        (0..100)
            .map(|r| (0..100).map(|c| (r * 100 + c) as i64).collect())
            .collect(),
    )
    .unwrap();

    group.bench_function("integers", |b| b.iter(|| to_string(black_box(&ints))));
    group.bench_function("floats", |b| b.iter(|| to_string(black_box(&floats))));

    let rows = Value::from(matrix.clone());
    let columns = Value::from(matrix.transpose());
    group.bench_function("matrix", |b| b.iter(|| to_string(black_box(&rows))));
    group.bench_function("matrix_transposed", |b| {
        b.iter(|| to_string(black_box(&columns)))
    });

    group.finish();
}

fn benchmark_orientations(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_orient");
    let frame = Value::from(sample_frame(200, 8));

    for orient in [
        Orient::Split,
        Orient::Records,
        Orient::Index,
        Orient::Columns,
        Orient::Values,
    ] {
        let options = EncodeOptions::new().with_orient(orient);
        group.bench_with_input(BenchmarkId::from_parameter(orient.as_str()), &options, |b, options| {
            b.iter(|| to_string_with_options(black_box(&frame), options.clone()))
        });
    }
    group.finish();
}

fn benchmark_caller_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("caller_buffer");
    let small = value!([1, 2, 3, "four", null]);
    let large = Value::List((0..100).map(user_record).collect());

    group.bench_function("fits", |b| {
        let mut buf = [0u8; 256];
        b.iter(|| to_buffer(black_box(&small), EncodeOptions::new(), &mut buf).map(|out| out.len()))
    });
    group.bench_function("spills", |b| {
        let mut buf = [0u8; 256];
        b.iter(|| to_buffer(black_box(&large), EncodeOptions::new(), &mut buf).map(|out| out.len()))
    });

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let users = Value::List((0..100).map(user_record).collect());
    let json: serde_json::Value = serde_json::from_str(&to_string(&users).unwrap()).unwrap();

    let mut group = c.benchmark_group("comparison");

    group.bench_function("objson_encode", |b| b.iter(|| to_string(black_box(&users))));
    group.bench_function("serde_json_encode", |b| {
        b.iter(|| serde_json::to_string(black_box(&json)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_encode_simple,
    benchmark_encode_list,
    benchmark_string_encoding,
    benchmark_arrays,
    benchmark_orientations,
    benchmark_caller_buffer,
    benchmark_comparison_with_json
);
criterion_main!(benches);
