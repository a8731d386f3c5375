// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::collections::btree_map;
use std::collections::BTreeMap;

/// Value of one call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// A single value.
    Scalar(String),
    /// Several values under the same key, possibly nested.
    List(Vec<ArgValue>),
}

impl ArgValue {
    /// Returns the value if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ArgValue::Scalar(v) => Some(v),
            ArgValue::List(_) => None,
        }
    }

    /// Flatten into the scalar values it carries, depth-first in caller order.
    pub fn values(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_values(&mut out);
        out
    }

    fn collect_values<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ArgValue::Scalar(v) => out.push(v),
            ArgValue::List(vs) => vs.iter().for_each(|v| v.collect_values(out)),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        ArgValue::Scalar(v.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        ArgValue::Scalar(v)
    }
}

impl From<&String> for ArgValue {
    fn from(v: &String) -> Self {
        ArgValue::Scalar(v.clone())
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ArgValue {
                fn from(v: $t) -> Self {
                    ArgValue::Scalar(v.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(vs: Vec<T>) -> Self {
        ArgValue::List(vs.into_iter().map(Into::into).collect())
    }
}

/// Caller supplied arguments of one call.
///
/// Keys are unique; inserting an existing key replaces its value.
///
/// ```
/// use botr_system_api::Args;
///
/// let args = Args::new()
///     .with("video_key", "yYul4DRz")
///     .with("tags", vec!["news", "sports"]);
/// assert_eq!(args.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    inner: BTreeMap<String, ArgValue>,
}

impl Args {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an argument, returning the previous value of this key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Option<ArgValue> {
        self.inner.insert(key.into(), value.into())
    }

    /// Get the value of `key`.
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.inner.get(key)
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ArgValue> {
        self.inner.remove(key)
    }

    /// Check whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check whether there is no argument.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate arguments in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<ArgValue>> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Args::new();
        for (k, v) in iter {
            args.insert(k, v);
        }
        args
    }
}

impl<K: Into<String>, V: Into<ArgValue>, const N: usize> From<[(K, V); N]> for Args {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Args {
    type Item = (String, ArgValue);
    type IntoIter = btree_map::IntoIter<String, ArgValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}
