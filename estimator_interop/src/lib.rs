//! C ABI over [`linear_estimator::Estimator`].
//!
//! Handles are boxed estimators owned by the caller between `create` and
//! `destroy`. Every entry point reports failure through its return value
//! (`false` or null) and never takes ownership of caller buffers.

use std::ffi::c_char;

use linear_estimator::{approx_exp_in_place, Estimator, EstimatorConfig};

mod ffi;

/// Builds an estimator from a column-major coefficient buffer
/// (`coefficients[c * num_outputs + r]` is the weight of input `c` on output `r`).
///
/// Returns null when a pointer is null, the dimensions do not match, or
/// `num_inputs * num_outputs` overflows.
///
/// # Safety
/// `coefficients` must hold `num_inputs * num_outputs` floats and `intercepts`
/// `num_outputs` floats. The returned handle must be released with
/// [`linear_estimator_destroy`] exactly once.
#[no_mangle]
pub unsafe extern "C" fn linear_estimator_create(
    num_inputs: usize,
    num_outputs: usize,
    coefficients: *const f32,
    intercepts: *const f32,
) -> *mut Estimator {
    let Some(num_weights) = num_inputs.checked_mul(num_outputs) else {
        log::warn!(
            "linear_estimator_create: {} x {} coefficients overflow",
            num_inputs,
            num_outputs
        );
        return std::ptr::null_mut();
    };

    let (Some(coefficients), Some(intercepts)) = (unsafe {
        (
            ffi::as_slice(coefficients, num_weights),
            ffi::as_slice(intercepts, num_outputs),
        )
    }) else {
        log::warn!("linear_estimator_create: null buffer");
        return std::ptr::null_mut();
    };

    match Estimator::from_column_major(
        num_inputs,
        num_outputs,
        coefficients,
        intercepts,
        EstimatorConfig::default(),
    ) {
        Ok(estimator) => Box::into_raw(Box::new(estimator)),
        Err(err) => {
            log::warn!("linear_estimator_create: {}", err);
            std::ptr::null_mut()
        }
    }
}

/// Releases a handle. Null is ignored.
///
/// # Safety
/// `handle` must be null or a live handle from [`linear_estimator_create`];
/// it must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn linear_estimator_destroy(handle: *mut Estimator) {
    if !handle.is_null() {
        drop(unsafe { Box::from_raw(handle) });
    }
}

/// Resolves the handle and both buffers, then runs `op`.
///
/// # Safety
/// See [`linear_estimator_product`].
unsafe fn with_buffers<T>(
    name: &str,
    handle: *const Estimator,
    features: *const f32,
    features_len: usize,
    results: *mut f32,
    results_len: usize,
    op: impl FnOnce(&Estimator, &[f32], &mut [f32]) -> linear_estimator::EstimatorResult<T>,
) -> Option<T> {
    let estimator = unsafe { handle.as_ref() };
    let features = unsafe { ffi::as_slice(features, features_len) };
    let results = unsafe { ffi::as_slice_mut(results, results_len) };

    let (Some(estimator), Some(features), Some(results)) = (estimator, features, results) else {
        log::warn!("{}: null handle or buffer", name);
        return None;
    };

    op(estimator, features, results)
        .inspect_err(|err| log::warn!("{}: {}", name, err))
        .ok()
}

/// Writes the linear outputs into `results`.
///
/// # Safety
/// `handle` must be null or live. `features` must hold `features_len` floats
/// and `results` must hold `results_len` writable floats not aliasing `features`.
#[no_mangle]
pub unsafe extern "C" fn linear_estimator_product(
    handle: *const Estimator,
    features: *const f32,
    features_len: usize,
    results: *mut f32,
    results_len: usize,
) -> bool {
    unsafe {
        with_buffers(
            "linear_estimator_product",
            handle,
            features,
            features_len,
            results,
            results_len,
            Estimator::estimate_linear,
        )
    }
    .is_some()
}

/// Writes the unnormalized running sum of `exp(linear)` into `results`.
///
/// # Safety
/// Same contract as [`linear_estimator_product`].
#[no_mangle]
pub unsafe extern "C" fn linear_estimator_cumulative_exp(
    handle: *const Estimator,
    features: *const f32,
    features_len: usize,
    results: *mut f32,
    results_len: usize,
) -> bool {
    unsafe {
        with_buffers(
            "linear_estimator_cumulative_exp",
            handle,
            features,
            features_len,
            results,
            results_len,
            Estimator::estimate_cumulative_exp,
        )
    }
    .is_some()
}

/// Writes `exp(linear)` per output and stores their sum in `total` when it is
/// not null.
///
/// # Safety
/// Same contract as [`linear_estimator_product`]; a non-null `total` must be
/// writable.
#[no_mangle]
pub unsafe extern "C" fn linear_estimator_exp(
    handle: *const Estimator,
    features: *const f32,
    features_len: usize,
    results: *mut f32,
    results_len: usize,
    total: *mut f32,
) -> bool {
    let sum = unsafe {
        with_buffers(
            "linear_estimator_exp",
            handle,
            features,
            features_len,
            results,
            results_len,
            Estimator::estimate_exp,
        )
    };

    match sum {
        Some(sum) => {
            if let Some(total) = unsafe { total.as_mut() } {
                *total = sum;
            }
            true
        }
        None => false,
    }
}

/// Replaces every value with its approximate exponential.
///
/// # Safety
/// `values` must hold `len` writable floats.
#[no_mangle]
pub unsafe extern "C" fn exp_approx_in_place(values: *mut f32, len: usize) -> bool {
    match unsafe { ffi::as_slice_mut(values, len) } {
        Some(values) => {
            approx_exp_in_place(values);
            true
        }
        None => false,
    }
}

/// Starts file and console logging at `level` (e.g. `"info"`).
///
/// # Safety
/// `level` must be null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn linear_estimator_setup_logging(level: *const c_char) -> bool {
    let Some(level) = (unsafe { ffi::as_str(level) }) else {
        return false;
    };

    match common::try_setup_logging(level) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("Logger initialization failed with {}", err);
            false
        }
    }
}
