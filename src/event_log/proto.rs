//! The subset of the tensorboard `Event` protobuf needed to recover scalars.
//! Fields not declared here (graphs, histograms, images, ...) are skipped by
//! the decoder.

use prost::Message;

#[derive(Clone, PartialEq, Message)]
pub struct Event {
    #[prost(double, tag = "1")]
    pub wall_time: f64,
    #[prost(int64, tag = "2")]
    pub step: i64,
    #[prost(string, optional, tag = "3")]
    pub file_version: Option<String>,
    #[prost(message, optional, tag = "5")]
    pub summary: Option<Summary>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Summary {
    #[prost(message, repeated, tag = "1")]
    pub value: Vec<SummaryValue>,
}

#[derive(Clone, PartialEq, Message)]
pub struct SummaryValue {
    #[prost(string, tag = "1")]
    pub tag: String,
    #[prost(float, optional, tag = "2")]
    pub simple_value: Option<f32>,
    #[prost(message, optional, tag = "8")]
    pub tensor: Option<TensorProto>,
}

#[derive(Clone, PartialEq, Message)]
pub struct TensorProto {
    #[prost(int32, tag = "1")]
    pub dtype: i32,
    #[prost(bytes = "vec", tag = "4")]
    pub tensor_content: Vec<u8>,
    #[prost(float, repeated, tag = "5")]
    pub float_val: Vec<f32>,
    #[prost(double, repeated, tag = "6")]
    pub double_val: Vec<f64>,
}

const DT_FLOAT: i32 = 1;
const DT_DOUBLE: i32 = 2;

impl SummaryValue {
    /// The scalar carried by this value, from either the legacy
    /// `simple_value` field or a rank-0 tensor.
    pub fn scalar(&self) -> Option<f64> {
        if let Some(value) = self.simple_value {
            return Some(value as f64);
        }
        self.tensor.as_ref().and_then(TensorProto::scalar)
    }
}

impl TensorProto {
    fn scalar(&self) -> Option<f64> {
        if let Some(value) = self.float_val.first() {
            return Some(*value as f64);
        }
        if let Some(value) = self.double_val.first() {
            return Some(*value);
        }
        match (self.dtype, self.tensor_content.len()) {
            (DT_FLOAT, 4) => {
                let bytes: [u8; 4] = self.tensor_content[..].try_into().ok()?;
                Some(f32::from_le_bytes(bytes) as f64)
            }
            (DT_DOUBLE, 8) => {
                let bytes: [u8; 8] = self.tensor_content[..].try_into().ok()?;
                Some(f64::from_le_bytes(bytes))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_simple_and_tensor_scalars() {
        let simple = SummaryValue {
            tag: "a".into(),
            simple_value: Some(1.5),
            tensor: None,
        };
        assert_eq!(simple.scalar(), Some(1.5));

        let packed = SummaryValue {
            tag: "b".into(),
            simple_value: None,
            tensor: Some(TensorProto {
                dtype: DT_DOUBLE,
                tensor_content: 2.25f64.to_le_bytes().to_vec(),
                ..Default::default()
            }),
        };
        assert_eq!(packed.scalar(), Some(2.25));

        let listed = SummaryValue {
            tag: "c".into(),
            simple_value: None,
            tensor: Some(TensorProto {
                dtype: DT_FLOAT,
                float_val: vec![-4.0],
                ..Default::default()
            }),
        };
        assert_eq!(listed.scalar(), Some(-4.0));
    }

    #[test]
    fn non_scalar_values_are_skipped() {
        let histogram_only = SummaryValue {
            tag: "h".into(),
            ..Default::default()
        };
        assert_eq!(histogram_only.scalar(), None);
    }
}
