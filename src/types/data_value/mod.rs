use serde::{Deserialize, Serialize};

/// 列默认值 - 与具体数据库无关的字面量表示
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    /// 空值
    Null,
    /// 布尔值
    Bool(bool),
    /// 整数
    Int(i64),
    /// 无符号整数
    UInt(u64),
    /// 浮点数
    Float(f64),
    /// 字符串
    String(String),
    /// 原样输出的SQL表达式，例如 CURRENT_TIMESTAMP
    Expression(String),
}

impl std::fmt::Display for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataValue::Null => write!(f, "null"),
            DataValue::Bool(b) => write!(f, "{}", b),
            DataValue::Int(i) => write!(f, "{}", i),
            DataValue::UInt(u) => write!(f, "{}", u),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::String(s) => write!(f, "{}", s),
            DataValue::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl std::fmt::Debug for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Debug trait 和 Display 保持一致，显示实际值而不是类型构造函数
        write!(f, "{}", self)
    }
}

impl DataValue {
    /// 渲染为SQL字面量
    ///
    /// 字符串使用单引号并转义内部单引号，表达式原样输出
    pub fn to_sql_literal(&self) -> String {
        match self {
            DataValue::Null => "NULL".to_string(),
            DataValue::Bool(b) => if *b { "1".to_string() } else { "0".to_string() },
            DataValue::Int(i) => i.to_string(),
            DataValue::UInt(u) => u.to_string(),
            DataValue::Float(f) => f.to_string(),
            DataValue::String(s) => format!("'{}'", s.replace('\'', "''")),
            DataValue::Expression(expr) => expr.clone(),
        }
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Bool(value)
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        DataValue::Int(value as i64)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Int(value)
    }
}

impl From<u32> for DataValue {
    fn from(value: u32) -> Self {
        DataValue::UInt(value as u64)
    }
}

impl From<u64> for DataValue {
    fn from(value: u64) -> Self {
        DataValue::UInt(value)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::String(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::String(value)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => DataValue::Null,
        }
    }
}
