/* src/set/json.rs */

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ContentSet;
use crate::name::eq_ignore_case;
use crate::{ContentError, Result};

const INPUTS: &str = "Inputs";
const DATA: &str = "Data";

impl ContentSet {
	/// Gets an entry and deserializes it from JSON.
	pub fn get_json<T: DeserializeOwned>(&self, entry: &str) -> Result<T> {
		let text = self.get_string(entry)?;
		Ok(serde_json::from_str(&text)?)
	}

	pub async fn get_json_async<T: DeserializeOwned>(&self, entry: &str) -> Result<T> {
		let text = self.get_string_async(entry).await?;
		Ok(serde_json::from_str(&text)?)
	}

	/// Gets a JSON array, keeping the items accepted by `predicate`.
	pub async fn get_json_list<T, P>(&self, entry: &str, predicate: P) -> Result<Vec<T>>
	where
		T: DeserializeOwned,
		P: Fn(&T) -> bool,
	{
		let items: Vec<T> = self.get_json_async(entry).await?;
		Ok(items.into_iter().filter(|item| predicate(item)).collect())
	}

	/// Gets the first item of a JSON array accepted by `predicate`.
	pub async fn get_json_list_entry<T, P>(&self, entry: &str, predicate: P) -> Result<Option<T>>
	where
		T: DeserializeOwned,
		P: Fn(&T) -> bool,
	{
		let items: Vec<T> = self.get_json_async(entry).await?;
		Ok(items.into_iter().find(|item| predicate(item)))
	}

	pub async fn get_json_map<T: DeserializeOwned>(&self, entry: &str) -> Result<HashMap<String, T>> {
		self.get_json_async(entry).await
	}

	/// Gets one value of a JSON object by key.
	///
	/// An exact key match wins. With `ignore_case`, the first key in document
	/// order that matches case-insensitively is used otherwise.
	pub async fn get_json_map_entry<T: DeserializeOwned>(
		&self,
		entry: &str,
		key: &str,
		ignore_case: bool,
	) -> Result<Option<T>> {
		let text = self.get_string_async(entry).await?;
		find_map_entry(&text, key, ignore_case)
	}

	/// Looks up a case table: a JSON array of `{"Inputs": [...], "Data": {...}}` items.
	///
	/// Returns the `Data` of the first item whose inputs equal `args`, compared by
	/// their text (strings raw, everything else as JSON).
	///
	/// Tables are strict JSON: comments and trailing commas are rejected with
	/// [`ContentError::Json`].
	pub async fn get_json_by_inputs<T: DeserializeOwned>(
		&self,
		entry: &str,
		args: &[Value],
	) -> Result<Option<T>> {
		let text = self.get_string_async(entry).await?;
		find_by_inputs(&text, args)
	}
}

fn find_map_entry<T: DeserializeOwned>(text: &str, key: &str, ignore_case: bool) -> Result<Option<T>> {
	let document: Value = serde_json::from_str(text)?;
	let Value::Object(map) = document else {
		return Err(ContentError::Structure("map must be a JSON object".to_string()));
	};

	let value = match map.get(key) {
		Some(value) => Some(value),
		None if ignore_case => map
			.iter()
			.find(|(candidate, _)| eq_ignore_case(candidate, key))
			.map(|(_, value)| value),
		None => None,
	};

	Ok(value.map(|value| T::deserialize(value)).transpose()?)
}

fn find_by_inputs<T: DeserializeOwned>(text: &str, args: &[Value]) -> Result<Option<T>> {
	let document: Value = serde_json::from_str(text)?;
	let Value::Array(items) = document else {
		return Err(ContentError::Structure("case table must be a JSON array".to_string()));
	};

	for item in items {
		let inputs = item
			.get(INPUTS)
			.ok_or_else(|| ContentError::Structure(format!("missing {} in item {}", INPUTS, item)))?;
		let Value::Array(inputs) = inputs else {
			return Err(ContentError::Structure(format!(
				"{} must be an array in item {}",
				INPUTS, item
			)));
		};
		if inputs.len() != args.len() {
			return Err(ContentError::Structure(format!(
				"expected {} inputs, found {} in item {}",
				args.len(),
				inputs.len(),
				item
			)));
		}

		if inputs.iter().zip(args).all(|(input, arg)| render(input) == render(arg)) {
			let data = item
				.get(DATA)
				.ok_or_else(|| ContentError::Structure(format!("missing {} in item {}", DATA, item)))?;
			return Ok(Some(T::deserialize(data)?));
		}
	}

	Ok(None)
}

fn render(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}
