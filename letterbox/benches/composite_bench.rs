//! 合成性能基准测试
//!
//! - 全屏合成：1080p 目标，32×32 源图（大倍数，行复制为主）
//! - 窄留边：源图与目标接近，逐像素编码为主
//! - 尺寸抖动：反复在两个尺寸之间切换，池只增长一次

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use letterbox::{
    composite, FrameBufferPool, FrameView, HeapStorage, Image, ImageSize, SurfaceSize,
};

fn checkerboard(width: u32, height: u32) -> Image {
    let pixels = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            if (x + y) % 2 == 0 {
                0xFFFF_FFFF
            } else {
                0x80FF_0000
            }
        })
        .collect();
    Image::from_argb(width, height, pixels).unwrap()
}

fn bench_composite_full_hd(c: &mut Criterion) {
    let image = checkerboard(32, 32);
    let size = SurfaceSize::new(1920, 1080);
    let mut bytes = vec![0u8; size.byte_len().unwrap()];

    c.bench_function("composite_1080p_from_32x32", |b| {
        b.iter(|| {
            let mut view = FrameView::new(&mut bytes, size).unwrap();
            black_box(composite(&image, &mut view));
        });
    });
}

fn bench_composite_scale_one(c: &mut Criterion) {
    let image = checkerboard(1900, 1000);
    let size = SurfaceSize::new(1920, 1080);
    let mut bytes = vec![0u8; size.byte_len().unwrap()];

    c.bench_function("composite_1080p_scale_one", |b| {
        b.iter(|| {
            let mut view = FrameView::new(&mut bytes, size).unwrap();
            black_box(composite(&image, &mut view));
        });
    });
}

/// 模拟拖拽缩放：尺寸来回变化，池容量只在第一次增长
fn bench_resize_jitter(c: &mut Criterion) {
    let image = checkerboard(16, 16);
    let sizes = [SurfaceSize::new(800, 600), SurfaceSize::new(640, 480)];
    let mut pool = FrameBufferPool::new(HeapStorage::new());
    let mut i = 0usize;

    c.bench_function("resize_jitter", |b| {
        b.iter(|| {
            let size = sizes[i % sizes.len()].at_least(ImageSize::new(16, 16));
            i += 1;
            let mapped = pool.ensure_capacity(size.byte_len().unwrap()).unwrap();
            let mut view = FrameView::new(mapped, size).unwrap();
            black_box(composite(&image, &mut view));
        });
    });
}

criterion_group!(
    benches,
    bench_composite_full_hd,
    bench_composite_scale_one,
    bench_resize_jitter
);
criterion_main!(benches);
