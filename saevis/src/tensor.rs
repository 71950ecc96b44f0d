use bytemuck::pod_read_unaligned;
use half::{bf16, f16};
use num_traits::ToPrimitive;

use crate::{ArrayElement, DataType, error::ValidationError};

/// Dense tensor stored as a little-endian byte buffer, the way activations
/// usually leave a model runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    bytes: Box<[u8]>,
    shape: Box<[usize]>,
    data_type: DataType,
}

/// Byte length of a buffer holding `shape`, `None` when it overflows `usize`.
pub fn size_for_shape(
    shape: &[usize],
    data_type: DataType,
) -> Option<usize> {
    if shape.contains(&0) {
        return Some(0);
    }
    shape
        .iter()
        .try_fold(data_type.size_in_bytes(), |size, &dim| size.checked_mul(dim))
}

impl Tensor {
    // Constructors
    pub fn from_bytes(
        bytes: Vec<u8>,
        shape: &[usize],
        data_type: DataType,
    ) -> Result<Self, ValidationError> {
        let expected = size_for_shape(shape, data_type).ok_or_else(|| {
            ValidationError::TensorTooLarge {
                shape: shape.to_vec(),
                data_type,
            }
        })?;
        if bytes.len() != expected {
            return Err(ValidationError::TensorSizeMismatch {
                shape: shape.to_vec(),
                data_type,
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            bytes: bytes.into_boxed_slice(),
            shape: shape.into(),
            data_type,
        })
    }

    pub fn from_slice<T: ArrayElement>(
        data: &[T],
        shape: &[usize],
    ) -> Result<Self, ValidationError> {
        Self::from_bytes(
            bytemuck::cast_slice(data).to_vec(),
            shape,
            T::data_type(),
        )
    }

    // Getters
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    // Conversion
    pub fn to_vec<T: ArrayElement>(&self) -> Vec<T> {
        assert_eq!(
            T::data_type(),
            self.data_type,
            "Invalid data type, expected {:?}, actual {:?}",
            T::data_type(),
            self.data_type
        );
        self.bytes
            .chunks_exact(self.data_type.size_in_bytes())
            .map(pod_read_unaligned::<T>)
            .collect()
    }

    /// Widens every element to `f64`, in row-major order.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self.data_type {
            DataType::BF16 => widen(self.to_vec::<bf16>()),
            DataType::F16 => widen(self.to_vec::<f16>()),
            DataType::F32 => widen(self.to_vec::<f32>()),
            DataType::F64 => self.to_vec::<f64>(),
            DataType::I8 => widen(self.to_vec::<i8>()),
            DataType::U8 => widen(self.to_vec::<u8>()),
            DataType::I16 => widen(self.to_vec::<i16>()),
            DataType::U16 => widen(self.to_vec::<u16>()),
            DataType::I32 => widen(self.to_vec::<i32>()),
            DataType::U32 => widen(self.to_vec::<u32>()),
            DataType::I64 => widen(self.to_vec::<i64>()),
            DataType::U64 => widen(self.to_vec::<u64>()),
        }
    }
}

fn widen<T: ToPrimitive>(values: Vec<T>) -> Vec<f64> {
    values
        .into_iter()
        .map(|value| value.to_f64().unwrap_or(f64::NAN))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_tensor_from_slice() {
        let tensor =
            Tensor::from_slice(&[1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])
                .unwrap();
        assert_eq!(tensor.shape(), &[2, 3]);
        assert_eq!(tensor.ndim(), 2);
        assert_eq!(tensor.data_type(), DataType::F32);
        assert_eq!(tensor.as_bytes().len(), 24);
        assert_eq!(tensor.to_f64_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_tensor_half_precision() {
        let values: Vec<f16> =
            [0.5_f32, -1.0, 2.0, 8.0].iter().map(|&v| f16::from_f32(v)).collect();
        let tensor = Tensor::from_slice(&values, &[2, 2]).unwrap();
        assert_eq!(tensor.to_f64_vec(), vec![0.5, -1.0, 2.0, 8.0]);

        let values: Vec<bf16> =
            [3.0_f32, 4.0].iter().map(|&v| bf16::from_f32(v)).collect();
        let tensor = Tensor::from_slice(&values, &[1, 2]).unwrap();
        assert_eq!(tensor.to_f64_vec(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_tensor_size_mismatch() {
        let error = Tensor::from_bytes(vec![0u8; 10], &[2, 2], DataType::F32)
            .unwrap_err();
        assert_eq!(
            error,
            ValidationError::TensorSizeMismatch {
                shape: vec![2, 2],
                data_type: DataType::F32,
                expected: 16,
                actual: 10,
            }
        );
    }

    #[test]
    fn test_tensor_shape_overflow() {
        let error =
            Tensor::from_bytes(Vec::new(), &[usize::MAX, 2], DataType::F32)
                .unwrap_err();
        assert_eq!(
            error,
            ValidationError::TensorTooLarge {
                shape: vec![usize::MAX, 2],
                data_type: DataType::F32,
            }
        );
        assert_eq!(error.kind(), ErrorKind::Shape);

        let error = Tensor::from_bytes(Vec::new(), &[1 << 62, 4], DataType::F32)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_tensor_zero_sized_dimension() {
        let tensor =
            Tensor::from_bytes(Vec::new(), &[usize::MAX, 0], DataType::F32)
                .unwrap();
        assert!(tensor.to_f64_vec().is_empty());
    }

    #[test]
    fn test_tensor_unaligned_bytes() {
        let mut bytes = vec![0u8];
        bytes.extend_from_slice(bytemuck::cast_slice(&[7_i32, -3]));
        let tensor =
            Tensor::from_bytes(bytes[1..].to_vec(), &[1, 2], DataType::I32)
                .unwrap();
        assert_eq!(tensor.to_f64_vec(), vec![7.0, -3.0]);
    }
}
