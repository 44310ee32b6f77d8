//! Randomized test-data generation.
//!
//! Generators are pure value constructors: each takes an optional set of
//! field overrides and returns a fully populated, immutable record. There is
//! no mutable builder to leak between tests; generating a second record can
//! never touch a previously returned one.

use chrono::{DateTime, Duration, Utc};
use fake::Fake;
use fake::faker::address::en::{
	BuildingNumber, CityName, SecondaryAddress, StateName, StreetName, ZipCode,
};
use fake::faker::company::en::{Buzzword, CompanyName, Industry};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Sentence, Word, Words};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

const DEFAULT_COUNTRY: &str = "United States";
const DEFAULT_PASSWORD_LENGTH: usize = 12;

const COLORS: &[&str] = &[
	"black", "white", "red", "blue", "green", "navy", "beige", "taupe", "orange", "yellow",
];

/// A registration-form user. Immutable snapshot; regenerate to get another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub password: String,
	pub company: String,
	pub address: String,
	pub address2: String,
	pub city: String,
	pub state: String,
	pub zip_code: String,
	pub country: String,
	pub phone: String,
	pub mobile_phone: String,
	pub alias: String,
}

/// Optional field overrides for [`UserData::generate`].
#[derive(Debug, Clone, Default)]
pub struct UserOverrides {
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub email: Option<String>,
	pub password: Option<String>,
	pub company: Option<String>,
	pub address: Option<String>,
	pub address2: Option<String>,
	pub city: Option<String>,
	pub state: Option<String>,
	pub zip_code: Option<String>,
	pub country: Option<String>,
	pub phone: Option<String>,
	pub mobile_phone: Option<String>,
	pub alias: Option<String>,
}

impl UserData {
	/// Generates a user, filling every field not pinned by `overrides`.
	pub fn generate(overrides: UserOverrides) -> Self {
		Self {
			first_name: overrides.first_name.unwrap_or_else(|| FirstName().fake()),
			last_name: overrides.last_name.unwrap_or_else(|| LastName().fake()),
			email: overrides.email.unwrap_or_else(email),
			password: overrides
				.password
				.unwrap_or_else(|| password(DEFAULT_PASSWORD_LENGTH)),
			company: overrides.company.unwrap_or_else(|| CompanyName().fake()),
			address: overrides.address.unwrap_or_else(street_address),
			address2: overrides
				.address2
				.unwrap_or_else(|| SecondaryAddress().fake()),
			city: overrides.city.unwrap_or_else(|| CityName().fake()),
			state: overrides.state.unwrap_or_else(|| StateName().fake()),
			zip_code: overrides.zip_code.unwrap_or_else(|| ZipCode().fake()),
			country: overrides
				.country
				.unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
			phone: overrides.phone.unwrap_or_else(phone_number),
			mobile_phone: overrides.mobile_phone.unwrap_or_else(phone_number),
			alias: overrides.alias.unwrap_or_else(word_pair),
		}
	}

	/// A fully random user.
	pub fn random() -> Self {
		Self::generate(UserOverrides::default())
	}
}

/// A catalog product. Same lifecycle as [`UserData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
	pub name: String,
	pub description: String,
	pub price: f64,
	pub category: String,
	pub color: String,
	pub quantity: u32,
}

/// Optional field overrides for [`ProductData::generate`].
#[derive(Debug, Clone, Default)]
pub struct ProductOverrides {
	pub name: Option<String>,
	pub description: Option<String>,
	pub price: Option<f64>,
	pub category: Option<String>,
	pub color: Option<String>,
	pub quantity: Option<u32>,
}

impl ProductData {
	pub fn generate(overrides: ProductOverrides) -> Self {
		Self {
			name: overrides.name.unwrap_or_else(product_name),
			description: overrides
				.description
				.unwrap_or_else(|| Sentence(5..12).fake()),
			price: overrides.price.unwrap_or_else(price),
			category: overrides.category.unwrap_or_else(|| Industry().fake()),
			color: overrides.color.unwrap_or_else(color),
			quantity: overrides
				.quantity
				.unwrap_or_else(|| rand::thread_rng().gen_range(1..=10)),
		}
	}

	pub fn random() -> Self {
		Self::generate(ProductOverrides::default())
	}
}

/// A shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
	pub street: String,
	pub city: String,
	pub state: String,
	pub zip_code: String,
	pub country: String,
}

impl Address {
	pub fn random() -> Self {
		Self {
			street: street_address(),
			city: CityName().fake(),
			state: StateName().fake(),
			zip_code: ZipCode().fake(),
			country: DEFAULT_COUNTRY.to_string(),
		}
	}
}

/// Random plausible email address.
pub fn email() -> String {
	SafeEmail().fake()
}

/// Random alphanumeric password of the given length.
pub fn password(length: usize) -> String {
	alphanumeric(length)
}

/// Random phone number.
pub fn phone_number() -> String {
	PhoneNumber().fake()
}

/// Random integer in the inclusive range.
pub fn number_in(min: i64, max: i64) -> i64 {
	rand::thread_rng().gen_range(min..=max)
}

/// Random alphanumeric string of the given length.
pub fn alphanumeric(length: usize) -> String {
	rand::thread_rng()
		.sample_iter(&Alphanumeric)
		.take(length)
		.map(char::from)
		.collect()
}

/// Random instant between `from` and `to`.
pub fn date_between(from: DateTime<Utc>, to: DateTime<Utc>) -> DateTime<Utc> {
	let span = (to - from).num_seconds().max(0);
	from + Duration::seconds(rand::thread_rng().gen_range(0..=span))
}

fn street_address() -> String {
	format!(
		"{} {}",
		BuildingNumber().fake::<String>(),
		StreetName().fake::<String>()
	)
}

fn product_name() -> String {
	format!(
		"{} {}",
		Buzzword().fake::<String>(),
		Word().fake::<String>()
	)
}

fn price() -> f64 {
	f64::from(rand::thread_rng().gen_range(100..=50_000)) / 100.0
}

fn color() -> String {
	COLORS
		.choose(&mut rand::thread_rng())
		.map(|c| (*c).to_string())
		.unwrap_or_else(|| "black".to_string())
}

fn word_pair() -> String {
	Words(2..3).fake::<Vec<String>>().join(" ")
}
