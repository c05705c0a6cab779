//! Dynamic GPU buffer management with automatic resizing.
//!
//! Provides buffers that grow automatically when data exceeds capacity,
//! using a 2x growth strategy to minimize reallocations.

/// A GPU buffer that can grow dynamically.
///
/// Uses a 2x growth strategy when capacity is exceeded.
/// Never shrinks (GPU buffers cannot be resized in place).
pub struct GrowableBuffer {
    buffer: wgpu::Buffer,
    capacity: usize, // Always equals the allocated buffer size in bytes
    usage: wgpu::BufferUsages,
    label: String,
}

impl GrowableBuffer {
    /// Buffer initialized from existing data.
    ///
    /// The allocation is padded to the minimum capacity so small meshes can
    /// take a slightly larger write without reallocating.
    #[must_use]
    pub fn new_with_data<T: bytemuck::Pod>(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        let data_bytes: &[u8] = bytemuck::cast_slice(data);
        let capacity = initial_capacity(data_bytes.len());

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: true,
        });
        {
            let mut mapped = buffer.slice(..).get_mapped_range_mut();
            mapped[..data_bytes.len()].copy_from_slice(data_bytes);
        }
        buffer.unmap();

        Self {
            buffer,
            capacity,
            usage,
            label: label.to_owned(),
        }
    }

    /// Write data to the buffer, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated (bind groups referencing
    /// it need recreation).
    pub fn write<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let data_bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = data_bytes.len();

        let reallocated = match grown_capacity(needed, self.capacity) {
            Some(new_capacity) => {
                self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(&self.label),
                    size: new_capacity as u64,
                    usage: self.usage | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                self.capacity = new_capacity;
                true
            }
            None => false,
        };

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, data_bytes);
        }

        reallocated
    }

    /// The underlying wgpu buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

/// Byte capacity for a freshly created buffer holding `len` bytes: at least
/// the minimum capacity, rounded up to wgpu's copy alignment so the buffer
/// can be mapped at creation.
fn initial_capacity(len: usize) -> usize {
    const MIN_CAPACITY: usize = 64;
    align_to(len.max(MIN_CAPACITY), wgpu::COPY_BUFFER_ALIGNMENT as usize)
}

/// New capacity when `needed` bytes exceed `capacity`; `None` when the data
/// fits in place. Growth at least doubles, with a 1KB floor per step.
fn grown_capacity(needed: usize, capacity: usize) -> Option<usize> {
    if needed > capacity {
        Some((needed * 2).max(capacity + 1024))
    } else {
        None
    }
}

fn align_to(value: usize, alignment: usize) -> usize {
    value.div_ceil(alignment) * alignment
}

/// Typed wrapper for [`GrowableBuffer`].
pub struct TypedBuffer<T> {
    inner: GrowableBuffer,
    _marker: std::marker::PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Typed buffer initialized from existing data.
    #[must_use]
    pub fn new_with_data(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        Self {
            inner: GrowableBuffer::new_with_data(device, label, data, usage),
            _marker: std::marker::PhantomData,
        }
    }

    /// Write data to the buffer, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated (bind groups referencing
    /// it need recreation).
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        self.inner.write(device, queue, data)
    }

    /// The underlying wgpu buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        self.inner.buffer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_allocations_get_the_minimum_capacity() {
        // One 32-byte vertex still allocates (and records) 64 bytes, so a
        // second vertex fits in place without reallocating.
        assert_eq!(initial_capacity(32), 64);
        assert_eq!(grown_capacity(64, initial_capacity(32)), None);
    }

    #[test]
    fn initial_capacity_is_copy_aligned() {
        let capacity = initial_capacity(70);
        assert!(capacity >= 70);
        assert_eq!(capacity % wgpu::COPY_BUFFER_ALIGNMENT as usize, 0);
    }

    #[test]
    fn writes_within_capacity_do_not_grow() {
        assert_eq!(grown_capacity(64, 64), None);
        assert_eq!(grown_capacity(0, 64), None);
    }

    #[test]
    fn growth_at_least_doubles_with_a_floor() {
        // Small overflows step by the 1KB floor.
        assert_eq!(grown_capacity(100, 64), Some(1088));
        // Large overflows double the needed size.
        assert_eq!(grown_capacity(4096, 64), Some(8192));
    }
}
