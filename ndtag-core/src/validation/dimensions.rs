//! Dimension arithmetic for multi-dimensional arrays
//!
//! Pure functions over dimension slices with overflow protection.

use crate::NdtagError;

/// Validate that `dimensions` describe an array of rank at least 1
pub const fn validate_dimensions(dimensions: &[usize]) -> Result<(), NdtagError> {
    if dimensions.is_empty() {
        return Err(NdtagError::InvalidDimensions);
    }
    Ok(())
}

/// Product of all dimensions but the leading one
pub const fn hyper_row_length(dimensions: &[usize]) -> Result<usize, NdtagError> {
    let mut length: usize = 1;
    let mut i = 1;
    while i < dimensions.len() {
        length = match length.checked_mul(dimensions[i]) {
            Some(product) => product,
            None => return Err(NdtagError::ArraySizeOverflow),
        };
        i += 1;
    }
    Ok(length)
}

/// Backing storage length for `dimensions` with room for `capacity_hyper_rows`
///
/// The leading dimension always fits, whatever the requested capacity.
pub const fn storage_length(
    dimensions: &[usize],
    capacity_hyper_rows: usize,
) -> Result<usize, NdtagError> {
    if let Err(err) = validate_dimensions(dimensions) {
        return Err(err);
    }
    let hyper_row_length = match hyper_row_length(dimensions) {
        Ok(length) => length,
        Err(err) => return Err(err),
    };
    let hyper_rows = if dimensions[0] > capacity_hyper_rows {
        dimensions[0]
    } else {
        capacity_hyper_rows
    };
    match hyper_rows.checked_mul(hyper_row_length) {
        Some(length) => Ok(length),
        None => Err(NdtagError::ArraySizeOverflow),
    }
}

/// Row-major offset of `indices` in an array of `dimensions`
///
/// Fails with `IndexOutOfRange` on rank mismatch or any index not below its
/// dimension.
pub fn row_major_index(dimensions: &[usize], indices: &[usize]) -> Result<usize, NdtagError> {
    if indices.len() != dimensions.len() {
        return Err(NdtagError::IndexOutOfRange);
    }
    let mut index = 0usize;
    for (&i, &dim) in indices.iter().zip(dimensions) {
        if i >= dim {
            return Err(NdtagError::IndexOutOfRange);
        }
        index = index * dim + i;
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dimensions() {
        assert_eq!(validate_dimensions(&[]), Err(NdtagError::InvalidDimensions));
        assert_eq!(validate_dimensions(&[0]), Ok(()));
        assert_eq!(validate_dimensions(&[3, 4]), Ok(()));
    }

    #[test]
    fn test_hyper_row_length() {
        assert_eq!(hyper_row_length(&[7]), Ok(1));
        assert_eq!(hyper_row_length(&[3, 4]), Ok(4));
        assert_eq!(hyper_row_length(&[2, 3, 5]), Ok(15));
        assert_eq!(hyper_row_length(&[2, 0, 5]), Ok(0));
        assert_eq!(
            hyper_row_length(&[1, usize::MAX, 2]),
            Err(NdtagError::ArraySizeOverflow)
        );
    }

    #[test]
    fn test_storage_length() {
        assert_eq!(storage_length(&[3, 4], 0), Ok(12));
        assert_eq!(storage_length(&[3, 4], 10), Ok(40));
        assert_eq!(storage_length(&[3, 4], 2), Ok(12));
        assert_eq!(storage_length(&[], 2), Err(NdtagError::InvalidDimensions));
    }

    #[test]
    fn test_row_major_index() {
        assert_eq!(row_major_index(&[3, 4], &[0, 0]), Ok(0));
        assert_eq!(row_major_index(&[3, 4], &[1, 2]), Ok(6));
        assert_eq!(row_major_index(&[3, 4], &[2, 3]), Ok(11));
        assert_eq!(row_major_index(&[2, 3, 4], &[1, 2, 3]), Ok(23));

        assert_eq!(row_major_index(&[3, 4], &[3, 0]), Err(NdtagError::IndexOutOfRange));
        assert_eq!(row_major_index(&[3, 4], &[0, 4]), Err(NdtagError::IndexOutOfRange));
        assert_eq!(row_major_index(&[3, 4], &[1]), Err(NdtagError::IndexOutOfRange));
    }
}
