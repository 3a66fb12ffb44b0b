use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use pitchwarp::{WarpConfig, WarpEffect, WarpStream};

struct CountingAllocator;

static TRACK_ALLOCATIONS: AtomicBool = AtomicBool::new(false);
static ALLOC_CALLS: AtomicUsize = AtomicUsize::new(0);
static REALLOC_CALLS: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL_ALLOCATOR: CountingAllocator = CountingAllocator;

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if TRACK_ALLOCATIONS.load(Ordering::Relaxed) {
            ALLOC_CALLS.fetch_add(1, Ordering::Relaxed);
        }
        unsafe { System.alloc(layout) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        if TRACK_ALLOCATIONS.load(Ordering::Relaxed) {
            ALLOC_CALLS.fetch_add(1, Ordering::Relaxed);
        }
        unsafe { System.alloc_zeroed(layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if TRACK_ALLOCATIONS.load(Ordering::Relaxed) {
            REALLOC_CALLS.fetch_add(1, Ordering::Relaxed);
        }
        unsafe { System.realloc(ptr, layout, new_size) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

fn begin_alloc_tracking() {
    ALLOC_CALLS.store(0, Ordering::Relaxed);
    REALLOC_CALLS.store(0, Ordering::Relaxed);
    TRACK_ALLOCATIONS.store(true, Ordering::SeqCst);
}

fn end_alloc_tracking() -> usize {
    TRACK_ALLOCATIONS.store(false, Ordering::SeqCst);
    ALLOC_CALLS.load(Ordering::Relaxed) + REALLOC_CALLS.load(Ordering::Relaxed)
}

fn test_block(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| (2.0 * std::f32::consts::PI * 2000.0 * i as f32 / 48000.0).sin())
        .collect()
}

// Kept as the only test in this binary so no other test allocates while
// tracking is on.
#[test]
fn process_steady_state_does_not_allocate() {
    const BLOCK: usize = 1024;
    const WARMUP_ITERS: usize = 8;
    const MEASURE_ITERS: usize = 128;

    let mut effect = WarpEffect::<f32>::new(WarpConfig::new(BLOCK, 200.0)).unwrap();
    effect.start(48000.0).unwrap();
    let input = test_block(BLOCK);
    let mut output = vec![0.0f32; BLOCK];

    for _ in 0..WARMUP_ITERS {
        effect.process(&input, &mut output);
    }
    begin_alloc_tracking();
    for _ in 0..MEASURE_ITERS {
        effect.process(&input, &mut output);
    }
    let calls = end_alloc_tracking();
    assert_eq!(calls, 0, "WarpEffect::process allocated {} times", calls);

    let mut stream = WarpStream::<f32>::start(WarpConfig::new(256, 200.0), 48000.0).unwrap();
    let mut host_buffer = test_block(300);
    for _ in 0..WARMUP_ITERS {
        stream.process(&mut host_buffer);
    }
    begin_alloc_tracking();
    for _ in 0..MEASURE_ITERS {
        stream.process(&mut host_buffer[..177]);
        stream.process(&mut host_buffer);
    }
    let calls = end_alloc_tracking();
    assert_eq!(calls, 0, "WarpStream::process allocated {} times", calls);
}
