//! Global heap and the gauge over it
//!
//! The path array is the only heap consumer; everything else in the
//! firmware is static. The gauge feeds the ingestion ceiling so a path
//! can never claim the reserve.

use embedded_alloc::LlffHeap as Heap;

use meridian_core::traits::mem::HeapGauge;

#[global_allocator]
static HEAP: Heap = Heap::empty();

/// Heap size: 16KB
pub const HEAP_SIZE: usize = 16 * 1024;

/// Initialize the allocator; call once at boot, before any allocation
pub fn init() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    unsafe { HEAP.init(core::ptr::addr_of_mut!(HEAP_MEM) as usize, HEAP_SIZE) }
}

/// Gauge over the global allocator
pub struct AllocatorGauge;

impl HeapGauge for AllocatorGauge {
    fn free_bytes(&self) -> usize {
        HEAP.free()
    }
}
