/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use image::RgbImage;
use lumen_benches::{bgr_noise, BENCH_HEIGHT, BENCH_WIDTH};
use lumen_core::colorspace::ColorSpace;
use lumen_filters::filters::Filter;
use lumen_filters::gaussian_blur::GaussianBlur;
use lumen_filters::params::FilterParams;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

fn bench_image() -> Image {
    let pixels = bgr_noise(BENCH_WIDTH, BENCH_HEIGHT, 42);
    Image::from_u8(&pixels, BENCH_WIDTH, BENCH_HEIGHT, ColorSpace::BGR).unwrap()
}

fn bench_filter(c: &mut Criterion, filter: Filter, params: &FilterParams) {
    let image = bench_image();

    let mut group = c.benchmark_group(format!("filters: {}", filter.name()));
    group.throughput(Throughput::Bytes((BENCH_WIDTH * BENCH_HEIGHT * 3) as u64));

    group.bench_function("lumen", |b| {
        b.iter(|| {
            let out = filter.apply(Some(&image), params).unwrap();
            black_box(out);
        })
    });
}

fn bench_thresholds(c: &mut Criterion) {
    let params = FilterParams::new().with("threshold_value", 90);

    bench_filter(c, Filter::Threshold, &params);
    bench_filter(c, Filter::Otsu, &params);
}

fn bench_morphology(c: &mut Criterion) {
    let params = FilterParams::new().with("kernel_size", 5);

    for filter in [Filter::Erosion, Filter::Dilation, Filter::Opening, Filter::Closing] {
        bench_filter(c, filter, &params);
    }
}

fn bench_smoothing(c: &mut Criterion) {
    let params = FilterParams::new().with("kernel_size", 9);

    bench_filter(c, Filter::LowPass, &params);
    bench_filter(c, Filter::LowPassMean, &params);
}

fn bench_edges(c: &mut Criterion) {
    let params = FilterParams::new().with("kernel_value", 5);

    for filter in [Filter::HighPass, Filter::HighPassLaplacian, Filter::HighPassSobel] {
        bench_filter(c, filter, &params);
    }
}

fn bench_kmeans(c: &mut Criterion) {
    let params = FilterParams::new().with("k", 3).with("seed", 7);

    bench_filter(c, Filter::KMeans, &params);
}

fn bench_gaussian(c: &mut Criterion) {
    let image = bench_image();
    let image_rs_im = RgbImage::from_raw(
        BENCH_WIDTH as u32,
        BENCH_HEIGHT as u32,
        bgr_noise(BENCH_WIDTH, BENCH_HEIGHT, 42)
    )
    .unwrap();

    let mut group = c.benchmark_group("filters: gaussian blur");
    group.throughput(Throughput::Bytes((BENCH_WIDTH * BENCH_HEIGHT * 3) as u64));

    group.bench_function("lumen", |b| {
        b.iter(|| {
            let out = GaussianBlur::new(3.0).clone_and_execute(&image).unwrap();
            black_box(out);
        })
    });
    group.bench_function("image-rs", |b| {
        b.iter(|| {
            let out = image::imageops::blur(&image_rs_im, 3.0);
            black_box(out);
        })
    });
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(20))
      };
    targets=bench_thresholds,
    bench_morphology,
    bench_smoothing,
    bench_edges,
    bench_kmeans,
    bench_gaussian
);

criterion_main!(benches);
