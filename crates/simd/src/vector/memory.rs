//! Masked loads/stores and gather/scatter
//!
//! Gather and scatter run lane by lane through scalar accesses, so they work
//! for every kind. Addresses are computed per lane as
//! `base + index * scale + offset`, counted in elements rather than bytes.

use super::Vector;
use crate::error::{Result, SimdError};
use crate::kind::RegisterKind;
use crate::mask::Mask;

#[inline(always)]
fn element_offset(index: i32, scale: i32, offset: i32) -> isize {
    index as isize * scale as isize + offset as isize
}

#[inline]
fn slice_index(lane: usize, index: i32, len: usize) -> Result<usize> {
    match usize::try_from(index) {
        Ok(i) if i < len => Ok(i),
        _ => Err(SimdError::IndexOutOfBounds {
            lane,
            index: index as i64,
            len,
        }),
    }
}

impl<K: RegisterKind> Vector<K> {
    /// Load the lanes whose mask is set; the others read as zero
    ///
    /// # Safety
    ///
    /// `ptr.add(i)` must be valid for reads for every set lane `i`. Memory
    /// behind clear lanes is not touched.
    #[inline(always)]
    pub unsafe fn masked_load(ptr: *const K::Lane, mask: Mask<K>) -> Self {
        Self(K::masked_load(ptr, mask.into_raw()))
    }

    /// Store the lanes whose mask is set, leaving other memory untouched
    ///
    /// # Safety
    ///
    /// `ptr.add(i)` must be valid for writes for every set lane `i`.
    #[inline(always)]
    pub unsafe fn masked_store(self, ptr: *mut K::Lane, mask: Mask<K>) {
        K::masked_store(self.0, ptr, mask.into_raw())
    }

    /// Safe [`masked_load`](Self::masked_load) from the front of `slice`
    ///
    /// # Panics
    ///
    /// Panics if the slice is shorter than the lane count.
    #[inline]
    pub fn masked_load_slice(slice: &[K::Lane], mask: Mask<K>) -> Self {
        assert!(
            slice.len() >= K::LANES,
            "slice of length {} is too short for {} lanes",
            slice.len(),
            K::LANES
        );
        unsafe { Self::masked_load(slice.as_ptr(), mask) }
    }

    /// Safe [`masked_store`](Self::masked_store) to the front of `slice`
    ///
    /// # Panics
    ///
    /// Panics if the slice is shorter than the lane count.
    #[inline]
    pub fn masked_store_slice(self, slice: &mut [K::Lane], mask: Mask<K>) {
        assert!(
            slice.len() >= K::LANES,
            "slice of length {} is too short for {} lanes",
            slice.len(),
            K::LANES
        );
        unsafe { self.masked_store(slice.as_mut_ptr(), mask) }
    }

    /// Lane `i` loaded from `base + indices[i]`
    ///
    /// # Safety
    ///
    /// Every computed element address must be valid for reads.
    #[inline(always)]
    pub unsafe fn gather(base: *const K::Lane, indices: Vector<K::Int>) -> Self {
        Self::gather_scaled(base, indices, 1, 0)
    }

    /// Lane `i` loaded from `base + indices[i] * scale + offset`
    ///
    /// # Safety
    ///
    /// Every computed element address must be valid for reads.
    #[inline]
    pub unsafe fn gather_scaled(
        base: *const K::Lane,
        indices: Vector<K::Int>,
        scale: i32,
        offset: i32,
    ) -> Self {
        let idx = indices.to_array();
        let mut lanes = K::Array::default();
        for (out, &index) in lanes.as_mut().iter_mut().zip(idx.as_ref()) {
            *out = base.offset(element_offset(index, scale, offset)).read();
        }
        Self::from_array(lanes)
    }

    /// Lane `i` loaded from `base + indices[i] * scales[i] + offsets[i]`
    ///
    /// # Safety
    ///
    /// Every computed element address must be valid for reads.
    #[inline]
    pub unsafe fn gather_with(
        base: *const K::Lane,
        indices: Vector<K::Int>,
        scales: Vector<K::Int>,
        offsets: Vector<K::Int>,
    ) -> Self {
        let (idx, scl, off) = (indices.to_array(), scales.to_array(), offsets.to_array());
        let mut lanes = K::Array::default();
        for (i, out) in lanes.as_mut().iter_mut().enumerate() {
            let at = element_offset(idx.as_ref()[i], scl.as_ref()[i], off.as_ref()[i]);
            *out = base.offset(at).read();
        }
        Self::from_array(lanes)
    }

    /// Lane `i` stored to `base + indices[i]`
    ///
    /// Lanes are written in ascending order, so with duplicate indices the
    /// highest lane wins. Callers should not depend on that.
    ///
    /// # Safety
    ///
    /// Every computed element address must be valid for writes.
    #[inline(always)]
    pub unsafe fn scatter(self, base: *mut K::Lane, indices: Vector<K::Int>) {
        self.scatter_scaled(base, indices, 1, 0)
    }

    /// Lane `i` stored to `base + indices[i] * scale + offset`
    ///
    /// # Safety
    ///
    /// Every computed element address must be valid for writes.
    #[inline]
    pub unsafe fn scatter_scaled(
        self,
        base: *mut K::Lane,
        indices: Vector<K::Int>,
        scale: i32,
        offset: i32,
    ) {
        let (lanes, idx) = (self.to_array(), indices.to_array());
        for (&value, &index) in lanes.as_ref().iter().zip(idx.as_ref()) {
            base.offset(element_offset(index, scale, offset)).write(value);
        }
    }

    /// Lane `i` stored to `base + indices[i] * scales[i] + offsets[i]`
    ///
    /// # Safety
    ///
    /// Every computed element address must be valid for writes.
    #[inline]
    pub unsafe fn scatter_with(
        self,
        base: *mut K::Lane,
        indices: Vector<K::Int>,
        scales: Vector<K::Int>,
        offsets: Vector<K::Int>,
    ) {
        let lanes = self.to_array();
        let (idx, scl, off) = (indices.to_array(), scales.to_array(), offsets.to_array());
        for (i, &value) in lanes.as_ref().iter().enumerate() {
            let at = element_offset(idx.as_ref()[i], scl.as_ref()[i], off.as_ref()[i]);
            base.offset(at).write(value);
        }
    }

    /// Bounds-checked gather from a slice
    ///
    /// # Panics
    ///
    /// Panics if any index is negative or past the end of `slice`.
    #[inline]
    pub fn gather_from_slice(slice: &[K::Lane], indices: Vector<K::Int>) -> Self {
        match Self::try_gather_from_slice(slice, indices) {
            Ok(v) => v,
            Err(err) => panic!("gather_from_slice: {err}"),
        }
    }

    /// Bounds-checked gather from a slice, reporting the first bad lane
    pub fn try_gather_from_slice(slice: &[K::Lane], indices: Vector<K::Int>) -> Result<Self> {
        let idx = indices.to_array();
        let mut lanes = K::Array::default();
        for (lane, (out, &index)) in lanes.as_mut().iter_mut().zip(idx.as_ref()).enumerate() {
            *out = slice[slice_index(lane, index, slice.len())?];
        }
        Ok(Self::from_array(lanes))
    }

    /// Bounds-checked scatter into a slice, lanes written in ascending order
    ///
    /// # Panics
    ///
    /// Panics if any index is negative or past the end of `slice`. Nothing is
    /// written in that case.
    #[inline]
    pub fn scatter_into_slice(self, slice: &mut [K::Lane], indices: Vector<K::Int>) {
        if let Err(err) = self.try_scatter_into_slice(slice, indices) {
            panic!("scatter_into_slice: {err}");
        }
    }

    /// Bounds-checked scatter into a slice
    ///
    /// Every index is validated before the first write, so on error the
    /// slice is unchanged.
    pub fn try_scatter_into_slice(
        self,
        slice: &mut [K::Lane],
        indices: Vector<K::Int>,
    ) -> Result<()> {
        let idx = indices.to_array();
        for (lane, &index) in idx.as_ref().iter().enumerate() {
            slice_index(lane, index, slice.len())?;
        }
        let lanes = self.to_array();
        for (&value, &index) in lanes.as_ref().iter().zip(idx.as_ref()) {
            slice[index as usize] = value;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::SimdError;
    use crate::kind::{Float128, Float256, Int128, Int256};
    use crate::mask::Mask;
    use crate::vector::Vector;

    #[test]
    fn test_masked_load_zero_fills() {
        let data = [1.0f32, 2.0, 3.0, 4.0];
        let v = Vector::<Float128>::masked_load_slice(&data, Mask::from_bitmask(0b1010));
        assert_eq!(v.to_array(), [0.0, 2.0, 0.0, 4.0]);
    }

    #[test]
    fn test_masked_store_leaves_clear_lanes() {
        let mut out = [-1i32; 8];
        Vector::<Int256>::set(0, 1, 2, 3, 4, 5, 6, 7)
            .masked_store_slice(&mut out, Mask::first_lanes(3));
        assert_eq!(out, [0, 1, 2, -1, -1, -1, -1, -1]);
    }

    #[test]
    fn test_masked_load_tail_with_raw_pointer() {
        // only the first two lanes are read, so a 2-element buffer is enough
        let data = [5i32, 6];
        let v = unsafe { Vector::<Int128>::masked_load(data.as_ptr(), Mask::first_lanes(2)) };
        assert_eq!(v.to_array(), [5, 6, 0, 0]);
    }

    #[test]
    fn test_gather() {
        let data = [10, 20, 30, 40];
        let idx = Vector::<Int128>::set(3, 1, 0, 2);
        let v = unsafe { Vector::<Int128>::gather(data.as_ptr(), idx) };
        assert_eq!(v.to_array(), [40, 20, 10, 30]);
        assert_eq!(Vector::<Int128>::gather_from_slice(&data, idx).to_array(), [40, 20, 10, 30]);
    }

    #[test]
    fn test_gather_scaled_and_with() {
        let data: [f32; 16] = core::array::from_fn(|i| i as f32);
        let idx = Vector::<Int128>::set(0, 1, 2, 3);
        let v = unsafe { Vector::<Float128>::gather_scaled(data.as_ptr(), idx, 3, 1) };
        assert_eq!(v.to_array(), [1.0, 4.0, 7.0, 10.0]);

        let scales = Vector::<Int128>::set(1, 2, 4, 5);
        let offsets = Vector::<Int128>::set(0, 0, 1, -1);
        let w = unsafe { Vector::<Float128>::gather_with(data.as_ptr(), idx, scales, offsets) };
        assert_eq!(w.to_array(), [0.0, 2.0, 9.0, 14.0]);
    }

    #[test]
    fn test_scatter() {
        let mut out = [0.0f32; 16];
        let v = Vector::<Float256>::set(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0);
        let idx = Vector::<Int256>::set(15, 0, 2, 4, 6, 8, 10, 12);
        unsafe { v.scatter(out.as_mut_ptr(), idx) };
        assert_eq!(out[15], 1.0);
        assert_eq!(out[0], 2.0);
        assert_eq!(out[12], 8.0);

        let mut out = [0i32; 12];
        let w = Vector::<Int128>::set(1, 2, 3, 4);
        let idx = Vector::<Int128>::set(0, 1, 2, 3);
        unsafe { w.scatter_scaled(out.as_mut_ptr(), idx, 2, 1) };
        assert_eq!(out[..8], [0, 1, 0, 2, 0, 3, 0, 4]);

        let mut out = [0i32; 8];
        let scales = Vector::<Int128>::splat(2);
        let offsets = Vector::<Int128>::set(0, 1, 0, 1);
        unsafe { w.scatter_with(out.as_mut_ptr(), idx, scales, offsets) };
        assert_eq!(out, [1, 0, 0, 2, 3, 0, 0, 4]);
    }

    #[test]
    fn test_scatter_duplicate_index_last_lane_wins() {
        let mut out = [0i32; 4];
        let idx = Vector::<Int128>::splat(1);
        Vector::<Int128>::set(1, 2, 3, 4).scatter_into_slice(&mut out, idx);
        assert_eq!(out, [0, 4, 0, 0]);
    }

    #[test]
    fn test_checked_gather_errors() {
        let data = [1, 2, 3, 4];
        let err = Vector::<Int128>::try_gather_from_slice(&data, Vector::<Int128>::set(0, 1, 4, -1))
            .unwrap_err();
        assert_eq!(err, SimdError::IndexOutOfBounds { lane: 2, index: 4, len: 4 });

        let err = Vector::<Int128>::try_gather_from_slice(&data, Vector::<Int128>::set(-1, 0, 0, 0))
            .unwrap_err();
        assert_eq!(err, SimdError::IndexOutOfBounds { lane: 0, index: -1, len: 4 });
    }

    #[test]
    fn test_checked_scatter_writes_nothing_on_error() {
        let mut out = [0i32; 4];
        let res = Vector::<Int128>::splat(9)
            .try_scatter_into_slice(&mut out, Vector::<Int128>::set(0, 1, 2, 9));
        assert!(res.is_err());
        assert_eq!(out, [0; 4]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_gather_from_slice_panics() {
        let _ = Vector::<Float128>::gather_from_slice(&[1.0, 2.0], Vector::splat(2));
    }
}
