//! Helper functions and utilities for tests

use opencv::core::{Mat, Scalar, CV_8UC1, CV_8UC3};
use opencv::prelude::*;

/// Create a uniform BGR frame
pub fn uniform_bgr(rows: i32, cols: i32, value: f64) -> Mat {
    Mat::new_rows_cols_with_default(rows, cols, CV_8UC3, Scalar::all(value)).unwrap()
}

/// Create a binary mask with a solid block of marked pixels
pub fn mask_with_block(rows: i32, cols: i32, x: i32, y: i32, side: i32) -> Mat {
    let mut mask = Mat::new_rows_cols_with_default(rows, cols, CV_8UC1, Scalar::all(0.0)).unwrap();
    for row in y..y + side {
        for col in x..x + side {
            *mask.at_2d_mut::<u8>(row, col).unwrap() = 255;
        }
    }
    mask
}

/// Create a uniform grayscale region
pub fn uniform_gray(rows: i32, cols: i32, value: f64) -> Mat {
    Mat::new_rows_cols_with_default(rows, cols, CV_8UC1, Scalar::all(value)).unwrap()
}
