use criterion::{black_box, criterion_group, criterion_main, Criterion};

use phantom::core::{
    wrap, CommandRegistry, ConsoleOverlay, ConsoleSettings, Diagnostics, LineBuffer,
};
use phantom::term::{CellFont, FrameBuffer, FrameCanvas};

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis \
nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

fn bench_wrap(c: &mut Criterion) {
    c.bench_function("wrap_200_chars_at_40", |b| {
        b.iter(|| wrap(black_box(LOREM), black_box(40.0), &CellFont))
    });
}

fn bench_line_buffer(c: &mut Criterion) {
    let mut buf = LineBuffer::with_limit(4096);
    c.bench_function("line_buffer_write_ring", |b| {
        b.iter(|| {
            buf.write(black_box("partial "));
            buf.write(black_box("line\nnext\n"));
        })
    });
}

fn bench_console_render(c: &mut Criterion) {
    let diagnostics = Diagnostics::new();
    let mut console = ConsoleOverlay::new(
        CellFont,
        ConsoleSettings::default().with_line_count(20),
        &diagnostics,
        CommandRegistry::new(),
    );
    for i in 0..500 {
        diagnostics.write_line(&format!("{i}: {LOREM}"));
    }
    console.open();
    let mut fb = FrameBuffer::new(120, 40);

    c.bench_function("console_render_120x40", |b| {
        b.iter(|| {
            let mut canvas = FrameCanvas::new(&mut fb);
            console.render(&mut canvas);
        })
    });
}

criterion_group!(benches, bench_wrap, bench_line_buffer, bench_console_render);
criterion_main!(benches);
