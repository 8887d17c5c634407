//! Multi-dimensional array with a growable leading dimension
//!
//! Elements live in one flat, row-major buffer. The buffer is sized in
//! hyper-rows (one step of the leading dimension) and may hold more
//! hyper-rows than the array currently uses, so the leading dimension can
//! grow without reallocating on every step.

use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use crate::validation::{hyper_row_length, row_major_index, storage_length, validate_dimensions};
use crate::{NdtagError, Result};

/// Convert signed dimensions, rejecting negative values
pub fn dimensions_from_signed(dimensions: &[i64]) -> Result<Vec<usize>> {
    dimensions
        .iter()
        .map(|&dim| {
            if dim < 0 {
                Err(NdtagError::InvalidDimensions)
            } else {
                usize::try_from(dim).map_err(|_| NdtagError::ArraySizeOverflow)
            }
        })
        .collect()
}

/// A multi-dimensional array of `T` stored in row-major order
#[derive(Clone)]
pub struct MdArray<T> {
    dimensions: Vec<usize>,
    hyper_row_length: usize,
    capacity_hyper_rows: usize,
    size: usize,
    values: Vec<T>,
}

impl<T: Clone + Default> MdArray<T> {
    /// Create an array of `dimensions` filled with `T::default()`
    pub fn new(dimensions: &[usize]) -> Result<Self> {
        Self::with_capacity(dimensions, 0)
    }

    /// Create an array with room for `capacity_hyper_rows` hyper-rows
    ///
    /// A capacity below `dimensions[0]` is raised to `dimensions[0]`.
    pub fn with_capacity(dimensions: &[usize], capacity_hyper_rows: usize) -> Result<Self> {
        let length = storage_length(dimensions, capacity_hyper_rows)?;
        let hyper_row_length = hyper_row_length(dimensions)?;
        let mut values = Vec::new();
        values.resize(length, T::default());
        Ok(Self {
            dimensions: dimensions.to_vec(),
            hyper_row_length,
            capacity_hyper_rows: capacity_hyper_rows.max(dimensions[0]),
            size: dimensions[0] * hyper_row_length,
            values,
        })
    }

    /// Create an array with signed `dimensions`
    pub fn with_signed_dimensions(dimensions: &[i64]) -> Result<Self> {
        Self::new(&dimensions_from_signed(dimensions)?)
    }

    /// Wrap `values` whose length must match `dimensions` exactly
    pub fn from_flat(values: Vec<T>, dimensions: &[usize]) -> Result<Self> {
        let expected = storage_length(dimensions, 0)?;
        if values.len() != expected {
            return Err(NdtagError::InvalidDimensions);
        }
        Self::from_flat_with_capacity(values, dimensions)
    }

    /// Wrap `values` that may carry spare hyper-rows after the live elements
    ///
    /// The length must be a whole number of hyper-rows, at least
    /// `dimensions[0]` of them.
    pub fn from_flat_with_capacity(values: Vec<T>, dimensions: &[usize]) -> Result<Self> {
        validate_dimensions(dimensions)?;
        let hyper_row_length = hyper_row_length(dimensions)?;
        let size = storage_length(dimensions, 0)?;
        if values.len() < size {
            return Err(NdtagError::InvalidDimensions);
        }
        let capacity_hyper_rows = if hyper_row_length == 0 {
            dimensions[0]
        } else if values.len() % hyper_row_length != 0 {
            return Err(NdtagError::InvalidDimensions);
        } else {
            values.len() / hyper_row_length
        };
        Ok(Self {
            dimensions: dimensions.to_vec(),
            hyper_row_length,
            capacity_hyper_rows,
            size,
            values,
        })
    }

    /// Reallocate the storage to hold `capacity_hyper_rows` hyper-rows
    ///
    /// No-op unless the new capacity is larger. Existing elements keep their
    /// positions; the storage is always a fresh buffer.
    pub fn grow_capacity_hyper_rows(&mut self, capacity_hyper_rows: usize) -> Result<()> {
        if capacity_hyper_rows <= self.capacity_hyper_rows {
            return Ok(());
        }
        let new_length = capacity_hyper_rows
            .checked_mul(self.hyper_row_length)
            .ok_or(NdtagError::ArraySizeOverflow)?;

        let keep = self.values.len().min(new_length);
        let mut values = Vec::with_capacity(new_length);
        values.extend_from_slice(&self.values[..keep]);
        values.resize(new_length, T::default());

        self.values = values;
        self.capacity_hyper_rows = capacity_hyper_rows;
        Ok(())
    }

    /// Add `count` hyper-rows, growing the capacity geometrically if needed
    ///
    /// Returns the new leading dimension. The new hyper-rows read as
    /// `T::default()`.
    pub fn inc_number_of_hyper_rows(&mut self, count: usize) -> Result<usize> {
        let needed = self.dimensions[0]
            .checked_add(count)
            .ok_or(NdtagError::ArraySizeOverflow)?;
        if needed > self.capacity_hyper_rows {
            let doubled = self.capacity_hyper_rows.saturating_mul(2);
            self.grow_capacity_hyper_rows(needed.max(doubled))?;
        }
        self.resize_leading_dimension(needed);
        Ok(needed)
    }

    /// Drop the last `count` hyper-rows without releasing storage
    ///
    /// Returns the new leading dimension.
    pub fn dec_number_of_hyper_rows(&mut self, count: usize) -> Result<usize> {
        let remaining = self.dimensions[0]
            .checked_sub(count)
            .ok_or(NdtagError::InvalidDimensions)?;
        self.resize_leading_dimension(remaining);
        Ok(remaining)
    }

    /// Set the leading dimension to `hyper_rows`
    pub fn set_number_of_hyper_rows(&mut self, hyper_rows: usize) -> Result<()> {
        let current = self.dimensions[0];
        if hyper_rows > current {
            self.inc_number_of_hyper_rows(hyper_rows - current)?;
        } else {
            self.dec_number_of_hyper_rows(current - hyper_rows)?;
        }
        Ok(())
    }

    fn resize_leading_dimension(&mut self, hyper_rows: usize) {
        let new_size = hyper_rows * self.hyper_row_length;
        if new_size > self.size {
            self.values[self.size..new_size].fill(T::default());
        }
        self.dimensions[0] = hyper_rows;
        self.size = new_size;
    }

    /// Copy of the live elements, without spare capacity
    pub fn to_flat_vec(&self) -> Vec<T> {
        self.live_values().to_vec()
    }

    /// Consume the array, returning the live elements
    pub fn into_flat_vec(mut self) -> Vec<T> {
        self.values.truncate(self.size);
        self.values
    }
}

impl<T> MdArray<T> {
    /// Number of dimensions
    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// Current dimensions
    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    /// Number of live elements
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether there are no live elements
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Length of the backing storage, including spare hyper-rows
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Number of hyper-rows the storage holds without reallocating
    pub fn capacity_hyper_rows(&self) -> usize {
        self.capacity_hyper_rows
    }

    /// Number of elements in one hyper-row
    pub fn hyper_row_length(&self) -> usize {
        self.hyper_row_length
    }

    /// Linear index of `indices` in the flat storage
    pub fn compute_index(&self, indices: &[usize]) -> Result<usize> {
        row_major_index(&self.dimensions, indices)
    }

    /// Linear index for a rank 2 array
    pub fn compute_index2(&self, index_x: usize, index_y: usize) -> Result<usize> {
        match self.dimensions[..] {
            [dim_x, dim_y] if index_x < dim_x && index_y < dim_y => Ok(index_x * dim_y + index_y),
            _ => Err(NdtagError::IndexOutOfRange),
        }
    }

    /// Linear index for a rank 3 array
    pub fn compute_index3(&self, index_x: usize, index_y: usize, index_z: usize) -> Result<usize> {
        match self.dimensions[..] {
            [dim_x, dim_y, dim_z] if index_x < dim_x && index_y < dim_y && index_z < dim_z => {
                Ok((index_x * dim_y + index_y) * dim_z + index_z)
            }
            _ => Err(NdtagError::IndexOutOfRange),
        }
    }

    /// Multi-index of the live element at `linear_index`
    pub fn compute_reverse_index(&self, linear_index: usize) -> Result<Vec<usize>> {
        if linear_index >= self.size {
            return Err(NdtagError::IndexOutOfRange);
        }
        let mut indices = alloc::vec![0; self.rank()];
        let mut remainder = linear_index;
        for (slot, &dim) in indices.iter_mut().zip(&self.dimensions).rev() {
            *slot = remainder % dim;
            remainder /= dim;
        }
        Ok(indices)
    }

    /// Element at `indices`
    pub fn get(&self, indices: &[usize]) -> Result<&T> {
        let index = self.compute_index(indices)?;
        Ok(&self.values[index])
    }

    /// Mutable element at `indices`
    pub fn get_mut(&mut self, indices: &[usize]) -> Result<&mut T> {
        let index = self.compute_index(indices)?;
        Ok(&mut self.values[index])
    }

    /// Set the element at `indices`
    pub fn set(&mut self, value: T, indices: &[usize]) -> Result<()> {
        *self.get_mut(indices)? = value;
        Ok(())
    }

    /// Element of a rank 1 array
    pub fn get1(&self, index: usize) -> Result<&T> {
        if self.rank() != 1 || index >= self.size {
            return Err(NdtagError::IndexOutOfRange);
        }
        Ok(&self.values[index])
    }

    /// Element of a rank 2 array
    pub fn get2(&self, index_x: usize, index_y: usize) -> Result<&T> {
        let index = self.compute_index2(index_x, index_y)?;
        Ok(&self.values[index])
    }

    /// Element of a rank 3 array
    pub fn get3(&self, index_x: usize, index_y: usize, index_z: usize) -> Result<&T> {
        let index = self.compute_index3(index_x, index_y, index_z)?;
        Ok(&self.values[index])
    }

    /// Set an element of a rank 1 array
    pub fn set1(&mut self, value: T, index: usize) -> Result<()> {
        if self.rank() != 1 || index >= self.size {
            return Err(NdtagError::IndexOutOfRange);
        }
        self.values[index] = value;
        Ok(())
    }

    /// Set an element of a rank 2 array
    pub fn set2(&mut self, value: T, index_x: usize, index_y: usize) -> Result<()> {
        let index = self.compute_index2(index_x, index_y)?;
        self.values[index] = value;
        Ok(())
    }

    /// Set an element of a rank 3 array
    pub fn set3(&mut self, value: T, index_x: usize, index_y: usize, index_z: usize) -> Result<()> {
        let index = self.compute_index3(index_x, index_y, index_z)?;
        self.values[index] = value;
        Ok(())
    }

    /// Live element at `linear_index`
    pub fn get_linear(&self, linear_index: usize) -> Result<&T> {
        self.live_values()
            .get(linear_index)
            .ok_or(NdtagError::IndexOutOfRange)
    }

    /// Set the live element at `linear_index`
    pub fn set_linear(&mut self, value: T, linear_index: usize) -> Result<()> {
        let slot = self
            .live_values_mut()
            .get_mut(linear_index)
            .ok_or(NdtagError::IndexOutOfRange)?;
        *slot = value;
        Ok(())
    }

    /// The whole backing storage, including spare hyper-rows
    ///
    /// Longer than [`MdArray::live_values`] whenever the capacity exceeds the
    /// leading dimension.
    pub fn as_flat_slice(&self) -> &[T] {
        &self.values
    }

    /// Mutable view of the whole backing storage
    pub fn as_flat_slice_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// The live elements in row-major order
    pub fn live_values(&self) -> &[T] {
        &self.values[..self.size]
    }

    /// Mutable view of the live elements
    pub fn live_values_mut(&mut self) -> &mut [T] {
        &mut self.values[..self.size]
    }

    /// Iterate over the live elements
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.live_values().iter()
    }
}

impl<T: PartialEq> PartialEq for MdArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions == other.dimensions && self.live_values() == other.live_values()
    }
}

impl<T: Eq> Eq for MdArray<T> {}

impl<T: Hash> Hash for MdArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimensions.hash(state);
        self.live_values().hash(state);
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for MdArray<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MdArray")
            .field("dimensions", &self.dimensions)
            .field("values", &self.live_values())
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a MdArray<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::MdArray;
    use alloc::vec::Vec;
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl<T: Serialize> Serialize for MdArray<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("MdArray", 2)?;
            state.serialize_field("dimensions", &self.dimensions)?;
            state.serialize_field("values", self.live_values())?;
            state.end()
        }
    }

    #[derive(Deserialize)]
    #[serde(rename = "MdArray")]
    struct MdArrayRepr<T> {
        dimensions: Vec<usize>,
        values: Vec<T>,
    }

    impl<'de, T: Clone + Default + Deserialize<'de>> Deserialize<'de> for MdArray<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let repr = MdArrayRepr::<T>::deserialize(deserializer)?;
            MdArray::from_flat(repr.values, &repr.dimensions).map_err(serde::de::Error::custom)
        }
    }
}
