use criterion::{criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};
use toastforge::compositor::raster::encode_png;
use toastforge::compositor::text::{SUBTITLE_PX, TITLE_PX};
use toastforge::compositor::{compose, BitmapFace, SliceSet};

fn slices() -> SliceSet {
    SliceSet::try_from_fn(|_| Ok(RgbaImage::from_pixel(4, 4, Rgba([60, 60, 60, 255])))).expect("slices")
}

fn bench_compose(c: &mut Criterion) {
    let set = slices();
    let icon = RgbaImage::from_pixel(32, 32, Rgba([200, 120, 40, 255]));
    let title = BitmapFace::for_px(TITLE_PX);
    let sub = BitmapFace::for_px(SUBTITLE_PX);

    c.bench_function("compose_nine_slice", |b| {
        b.iter(|| compose("Monster Hunter", "Kill any hostile monster", &icon, Some(&set), &title, &sub).unwrap())
    });

    c.bench_function("compose_rounded", |b| {
        b.iter(|| compose("Monster Hunter", "Kill any hostile monster", &icon, None, &title, &sub).unwrap())
    });

    let badge = compose("Monster Hunter", "Kill any hostile monster", &icon, Some(&set), &title, &sub).unwrap();
    c.bench_function("encode_png", |b| b.iter(|| encode_png(&badge.image).unwrap()));
}

criterion_group!(benches, bench_compose);
criterion_main!(benches);
