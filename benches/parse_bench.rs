use criterion::{black_box, criterion_group, criterion_main, Criterion};
use skelview::parse::load_motion_from_str;
use std::fmt::Write;

/// Build a BVH string with a straight chain of joints and synthetic motion
/// rows, roughly the shape of a mocap take.
fn synthetic_bvh(num_joints: usize, num_frames: usize) -> String {
    let mut text = String::from("HIERARCHY\nROOT joint0\n{\n");
    text.push_str("    OFFSET 0 0 0\n");
    text.push_str("    CHANNELS 6 Xposition Yposition Zposition Zrotation Xrotation Yrotation\n");
    for i in 1..num_joints {
        let _ = writeln!(text, "    JOINT joint{i}");
        text.push_str("    {\n");
        text.push_str("        OFFSET 0 1 0\n");
        text.push_str("        CHANNELS 3 Zrotation Xrotation Yrotation\n");
    }
    text.push_str("        End Site\n        {\n            OFFSET 0 0.5 0\n        }\n");
    for _ in 1..num_joints {
        text.push_str("    }\n");
    }
    text.push_str("}\nMOTION\n");
    let _ = writeln!(text, "Frames: {num_frames}");
    text.push_str("Frame Time: 0.0333333\n");

    let num_channels = 6 + (num_joints - 1) * 3;
    for frame in 0..num_frames {
        for c in 0..num_channels {
            let _ = write!(text, "{:.3} ", ((frame + c) % 90) as f64 * 0.5);
        }
        text.push('\n');
    }
    text
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let take = synthetic_bvh(24, 600);

    let mut group = c.benchmark_group("load-motion");
    group.sample_size(20);
    group.bench_function("24 joints x 600 frames", |b| {
        b.iter(|| black_box(load_motion_from_str(&take).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
