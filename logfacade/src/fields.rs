//! 구조화된 필드
//!
//! 로거 범위에 붙는 키/값 컨텍스트입니다. 병합은 항상 새 맵을 만들며
//! 입력을 변경하지 않습니다.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// 문자열 키와 임의 값으로 이루어진 필드 집합
///
/// 순서는 의미가 없으며 키로만 조회합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(HashMap<String, Value>);

impl Fields {
    /// 빈 필드 집합 생성
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// 단일 필드 집합 생성
    pub fn single<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut fields = Self::new();
        fields.insert(key, value);
        fields
    }

    /// 필드 추가 (같은 키가 있으면 덮어씀)
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.0.insert(key.into(), value.into());
    }

    /// 빌더 형태의 필드 추가
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// 두 필드 집합 병합
    ///
    /// `self`의 모든 키를 복사한 뒤 `overrides`를 덮어씁니다.
    /// 충돌하는 키는 `overrides` 쪽 값이 남습니다.
    pub fn merge(&self, overrides: &Fields) -> Fields {
        let mut merged = HashMap::with_capacity(self.0.len() + overrides.0.len());
        for (k, v) in &self.0 {
            merged.insert(k.clone(), v.clone());
        }
        for (k, v) in &overrides.0 {
            merged.insert(k.clone(), v.clone());
        }
        Fields(merged)
    }

    /// `key=value` 토큰을 공백으로 이어 붙인 문자열
    ///
    /// 순서는 내부 맵의 순회 순서를 따르므로 보장되지 않습니다.
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", k, render_value(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// 문자열은 따옴표 없이, 나머지는 JSON 표기로 출력
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        _ => value.to_string(),
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Fields(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Fields
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<HashMap<String, Value>> for Fields {
    fn from(map: HashMap<String, Value>) -> Self {
        Fields(map)
    }
}

impl IntoIterator for Fields {
    type Item = (String, Value);
    type IntoIter = std::collections::hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// 필드를 제공할 수 있는 타입
///
/// `add_fields_from`에 넘겨 로거에 필드를 옮겨 붙일 때 사용합니다.
pub trait HasFields {
    fn fields(&self) -> Fields;
}

impl HasFields for Fields {
    fn fields(&self) -> Fields {
        self.clone()
    }
}
