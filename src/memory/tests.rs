#![cfg(test)]

use std::mem::MaybeUninit;
use std::ptr::NonNull;
use std::slice;

use super::construct;
use super::uninit::*;
use super::{Allocator, RawBlock};
use crate::util::error::{AllocError, CapacityOverflow};
use crate::util::panic::assert_panics;
use crate::util::tracked::{Ledger, Tracked, ZeroSizedType};

fn drop_prefix<T>(slots: &mut [MaybeUninit<T>], count: usize) {
    for slot in &mut slots[..count] {
        // SAFETY: Callers only pass counts that they have initialized.
        unsafe { slot.assume_init_drop() }
    }
}

fn values(slots: &[MaybeUninit<Tracked>], count: usize) -> Vec<i32> {
    slots[..count]
        .iter()
        // SAFETY: Callers only pass counts that they have initialized.
        .map(|slot| unsafe { slot.assume_init_ref() }.value)
        .collect()
}

#[test]
fn test_construct_and_destroy() {
    let ledger = Ledger::new();
    let ptr = Allocator::<Tracked>::allocate(3);

    // SAFETY: ptr has room for 3 elements, each constructed once and destroyed once.
    unsafe {
        construct::construct(ptr, ledger.make(1));
        construct::construct_with(ptr.add(1), || ledger.make(2));
        Allocator::construct(ptr.add(2), ledger.make(3));
        assert_eq!(ledger.live(), 3);

        construct::destroy(ptr.add(2));
        assert_eq!(ledger.live(), 2, "destroy should run exactly one destructor.");

        construct::destroy_range(ptr, ptr.add(2));
        assert_eq!(ledger.live(), 0, "destroy_range should destroy the half-open range.");

        Allocator::deallocate(ptr, 3);
    }
    assert_eq!(ledger.drops(), 3);
}

#[test]
fn test_construct_with_panic_writes_nothing() {
    let mut block = RawBlock::<String>::allocate(1);
    let slot = block.as_ptr();

    assert_panics!({
        // SAFETY: The slot is valid and empty.
        unsafe { construct::construct_with(slot, || -> String { panic!("constructor failed") }) }
    });

    // The slot was never written, so it is simply reused.
    // SAFETY: The slot is valid and still empty.
    unsafe { construct::construct_default(slot) };
    // SAFETY: The slot was just initialized.
    assert_eq!(unsafe { block.slots_mut()[0].assume_init_ref() }, "");
    // SAFETY: The slot holds a live String.
    unsafe { construct::destroy(slot) };
}

#[test]
fn test_zst_lifecycle() {
    let ptr = Allocator::<ZeroSizedType>::allocate(10);
    assert_eq!(ptr, NonNull::dangling(), "Zero-sized types should never be allocated.");

    // SAFETY: Zero-sized slots are always valid for reads and writes.
    unsafe {
        construct::construct_default(ptr.add(9));
        construct::destroy_n(ptr, 10);
        Allocator::deallocate(ptr, 10);
    }
}

#[test]
fn test_allocator_empty_handle() {
    let ptr = Allocator::<u64>::allocate(0);
    assert_eq!(ptr, NonNull::dangling(), "allocate(0) should return the empty handle.");
    // SAFETY: Releasing the empty handle is a no-op.
    unsafe { Allocator::deallocate(ptr, 0) };

    let block = RawBlock::<u64>::empty();
    assert_eq!(block.capacity(), 0);
    drop(block);

    let one = Allocator::<u64>::allocate_one();
    // SAFETY: one was allocated for a single element and is written before being read.
    unsafe {
        Allocator::construct(one, 42);
        assert_eq!(*one.as_ref(), 42);
        Allocator::deallocate_one(one);
    }
}

#[test]
fn test_allocator_overflow() {
    assert_eq!(
        Allocator::<u64>::try_allocate(usize::MAX),
        Err(AllocError::CapacityOverflow(CapacityOverflow)),
        "An impossible layout should be reported rather than attempted."
    );
    assert!(RawBlock::<u32>::try_allocate(isize::MAX as usize).is_err());
    assert!(Allocator::<u32>::layout(Allocator::<u32>::max_size()).is_ok());
    assert_eq!(Allocator::<ZeroSizedType>::max_size(), usize::MAX);

    assert_panics!({
        Allocator::<u64>::allocate(usize::MAX / 2);
    });
}

#[test]
fn test_uninitialized_copy() {
    let ledger = Ledger::new();
    let src = [ledger.make(1), ledger.make(2), ledger.make(3)];
    let mut slots = [const { MaybeUninit::<Tracked>::uninit() }; 5];

    let tail = uninitialized_copy(&src, &mut slots);
    assert_eq!(tail.len(), 2, "The untouched tail should be returned.");

    assert_eq!(values(&slots, 3), [1, 2, 3]);
    assert_eq!(ledger.live(), 6);
    assert_eq!(ledger.clones(), 3);

    drop_prefix(&mut slots, 3);
    drop(src);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn test_uninitialized_copy_rolls_back() {
    let ledger = Ledger::new();
    let src: Vec<Tracked> = (0..5).map(|i| ledger.make(i)).collect();
    let mut slots = [const { MaybeUninit::<Tracked>::uninit() }; 5];

    ledger.fail_on_clone(4);
    assert_panics!({
        uninitialized_copy(&src, &mut slots);
    });

    assert_eq!(ledger.clones(), 3, "Three clones should have succeeded before the failure.");
    assert_eq!(
        ledger.live(),
        5,
        "Every element constructed before the failure should have been destroyed."
    );

    drop(src);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn test_uninitialized_copy_n() {
    let ledger = Ledger::new();
    let src: Vec<Tracked> = (0..4).map(|i| ledger.make(i)).collect();
    let mut slots = [const { MaybeUninit::<Tracked>::uninit() }; 4];

    let tail = uninitialized_copy_n(src.iter().rev(), 3, &mut slots);
    assert_eq!(tail.len(), 1);
    assert_eq!(values(&slots, 3), [3, 2, 1]);
    drop_prefix(&mut slots, 3);

    assert_panics!({
        uninitialized_copy_n(src.iter().take(2), 3, &mut slots);
    }, "A source shorter than the count should panic.");
    assert_eq!(ledger.live(), 4, "The two copied elements should have been rolled back.");
}

#[test]
fn test_bitwise_copy_matches_clone_path() {
    #[derive(Debug, Clone, Copy, PartialEq)]
    #[repr(C)]
    struct Pixel {
        r: u8,
        g: u8,
        b: u8,
        a: u8,
    }

    let src: Vec<Pixel> = (0..64_u8)
        .map(|i| Pixel { r: i, g: i.wrapping_mul(3), b: 255 - i, a: 7 })
        .collect();

    let mut generic = [MaybeUninit::<Pixel>::uninit(); 64];
    let mut bitwise = [MaybeUninit::<Pixel>::uninit(); 64];

    uninitialized_copy(&src, &mut generic);
    uninitialized_copy_bitwise(&src, &mut bitwise);

    // SAFETY: Both arrays are fully initialized and Pixel has no padding.
    let (generic, bitwise) = unsafe {
        (
            slice::from_raw_parts(generic.as_ptr().cast::<u8>(), size_of_val(&generic)),
            slice::from_raw_parts(bitwise.as_ptr().cast::<u8>(), size_of_val(&bitwise)),
        )
    };
    assert_eq!(generic, bitwise, "Both paths should produce identical bytes.");
}

#[test]
fn test_uninitialized_fill() {
    let ledger = Ledger::new();
    let value = ledger.make(9);
    let mut slots = [const { MaybeUninit::<Tracked>::uninit() }; 4];

    uninitialized_fill(&mut slots, &value);
    assert_eq!(values(&slots, 4), [9, 9, 9, 9]);
    drop_prefix(&mut slots, 4);

    ledger.fail_on_clone(3);
    assert_panics!({
        uninitialized_fill(&mut slots, &value);
    });
    assert_eq!(ledger.live(), 1, "Only the original value should remain.");
}

#[test]
fn test_chained_writes() {
    let mut slots = [MaybeUninit::<u32>::uninit(); 6];

    let tail = uninitialized_fill_n(&mut slots, 2, &7);
    let tail = uninitialized_copy(&[1, 2], tail);
    let tail = uninitialized_fill_with(tail, 2, |i| i as u32 * 10);
    assert!(tail.is_empty());

    // SAFETY: All six slots were initialized above.
    let written = slots.map(|slot| unsafe { slot.assume_init() });
    assert_eq!(written, [7, 7, 1, 2, 0, 10]);

    assert_panics!({
        uninitialized_fill_n(&mut slots, 7, &0);
    }, "A destination that is too short should panic.");
}

#[test]
fn test_try_fill_rolls_back() {
    let ledger = Ledger::new();
    let mut slots = [const { MaybeUninit::<Tracked>::uninit() }; 5];

    let result = try_uninitialized_fill_with(&mut slots, 5, |i| {
        if i == 3 {
            Err("generator failed")
        } else {
            Ok(ledger.make(i as i32))
        }
    });

    assert_eq!(result.err(), Some("generator failed"));
    assert_eq!(ledger.drops(), 3, "Three elements should have been rolled back.");
    assert_eq!(ledger.live(), 0);

    let tail = try_uninitialized_fill_with(&mut slots, 2, |i| Ok::<_, ()>(ledger.make(i as i32)))
        .expect("generator can't fail");
    assert_eq!(tail.len(), 3);
    assert_eq!(values(&slots, 2), [0, 1]);
    drop_prefix(&mut slots, 2);
}

#[test]
fn test_uninitialized_collect() {
    let mut slots = [const { MaybeUninit::<String>::uninit() }; 3];

    let (written, tail) = uninitialized_collect(["a", "b"].map(String::from), &mut slots);
    assert_eq!(written, 2);
    assert_eq!(tail.len(), 1);
    drop_prefix(&mut slots, written);

    let mut src = (0..10).map(|i| i.to_string());
    let (written, tail) = uninitialized_collect(&mut src, &mut slots);
    assert_eq!(written, 3, "Collecting should stop when the destination is full.");
    assert!(tail.is_empty());
    assert_eq!(src.next().as_deref(), Some("3"), "Remaining items shouldn't be consumed.");
    drop_prefix(&mut slots, written);

    let ledger = Ledger::new();
    assert_panics!({
        uninitialized_collect(
            (0..3).map(|i| if i < 2 { ledger.make(i) } else { panic!("iterator failed") }),
            &mut [const { MaybeUninit::<Tracked>::uninit() }; 3],
        );
    });
    assert_eq!(ledger.live(), 0, "Collected elements should be rolled back on panic.");
}

#[test]
fn test_uninitialized_move() {
    let ledger = Ledger::new();
    let mut src = [const { MaybeUninit::<Tracked>::uninit() }; 3];
    let mut dest = [const { MaybeUninit::<Tracked>::uninit() }; 4];
    uninitialized_fill_with(&mut src, 3, |i| ledger.make(i as i32));

    // SAFETY: The first two slots of src are initialized, and are treated as uninitialized after.
    let tail = unsafe { uninitialized_move_n(&mut src, 2, &mut dest) };
    assert_eq!(tail.len(), 2);
    // SAFETY: Slot 2 of src is still initialized.
    let tail = unsafe { uninitialized_move(&mut src[2..], tail) };
    assert_eq!(tail.len(), 1);

    assert_eq!(values(&dest, 3), [0, 1, 2]);
    assert_eq!(ledger.live(), 3, "Moving should neither construct nor destroy.");
    assert_eq!(ledger.clones(), 0);

    drop_prefix(&mut dest, 3);
    assert_eq!(ledger.live(), 0);
}
