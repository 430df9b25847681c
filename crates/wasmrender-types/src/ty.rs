use serde::{Deserialize, Serialize};
use std::fmt;

/// A value type of the target instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    I32,
    I64,
    F32,
    F64,
}

impl ValueType {
    /// Binary tag of this type. Both supported format revisions agree on it.
    pub fn tag(self) -> u8 {
        match self {
            Self::I32 => 0x01,
            Self::I64 => 0x02,
            Self::F32 => 0x03,
            Self::F64 => 0x04,
        }
    }

    /// Inverse of [`ValueType::tag`].
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(Self::I32),
            0x02 => Some(Self::I64),
            0x03 => Some(Self::F32),
            0x04 => Some(Self::F64),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I32 => write!(f, "i32"),
            Self::I64 => write!(f, "i64"),
            Self::F32 => write!(f, "f32"),
            Self::F64 => write!(f, "f64"),
        }
    }
}

/// The calling shape of a function: ordered parameter types plus an optional
/// result.
///
/// Signatures are plain values. Two signatures are the same signature iff
/// their result and parameter lists are element-wise equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub result: Option<ValueType>,
    pub params: Vec<ValueType>,
}

impl Signature {
    pub fn new(result: Option<ValueType>, params: Vec<ValueType>) -> Self {
        Self { result, params }
    }

    /// The signature a function is declared with.
    pub fn of(function: &crate::Function) -> Self {
        Self {
            result: function.result(),
            params: function.params().to_vec(),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ")")?;
        match self.result {
            Some(result) => write!(f, " -> {result}"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for ty in [ValueType::I32, ValueType::I64, ValueType::F32, ValueType::F64] {
            assert_eq!(ValueType::from_tag(ty.tag()), Some(ty));
        }
        assert_eq!(ValueType::from_tag(0x40), None);
    }

    #[test]
    fn test_signature_structural_equality() {
        let a = Signature::new(Some(ValueType::I32), vec![ValueType::I32, ValueType::F64]);
        let b = Signature::new(Some(ValueType::I32), vec![ValueType::I32, ValueType::F64]);
        let c = Signature::new(None, vec![ValueType::I32, ValueType::F64]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_signature_display() {
        let sig = Signature::new(Some(ValueType::I64), vec![ValueType::I32, ValueType::F32]);
        assert_eq!(sig.to_string(), "(i32, f32) -> i64");
        assert_eq!(Signature::new(None, Vec::new()).to_string(), "()");
    }

    #[test]
    fn test_signature_json() {
        let sig = Signature::new(Some(ValueType::F64), vec![ValueType::I32]);
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json, r#"{"result":"f64","params":["i32"]}"#);
        let back: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
    }
}
