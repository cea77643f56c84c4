//! OAuth scopes accepted by the authorization endpoint.

// std
use std::slice::Iter;
// self
use crate::_prelude::*;

/// Permission scopes the API grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
	/// Read a user's profile and media.
	Basic,
	/// Like and unlike media.
	Likes,
	/// Post and delete comments.
	Comments,
	/// Follow, unfollow, block, and approve users.
	Relationships,
	/// Read the profile via the Basic Display product.
	UserProfile,
	/// Read media via the Basic Display product.
	UserMedia,
}
impl Scope {
	/// Every scope the authorization endpoint accepts.
	pub const ALL: [Scope; 6] = [
		Scope::Basic,
		Scope::Likes,
		Scope::Comments,
		Scope::Relationships,
		Scope::UserProfile,
		Scope::UserMedia,
	];

	/// Returns the wire identifier.
	pub const fn as_str(self) -> &'static str {
		match self {
			Scope::Basic => "basic",
			Scope::Likes => "likes",
			Scope::Comments => "comments",
			Scope::Relationships => "relationships",
			Scope::UserProfile => "user_profile",
			Scope::UserMedia => "user_media",
		}
	}
}
impl Display for Scope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Scope {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Scope::ALL
			.into_iter()
			.find(|scope| scope.as_str() == s)
			.ok_or_else(|| Error::InvalidScope { scope: s.to_owned() })
	}
}

/// Requested scopes in caller order with duplicates collapsed.
///
/// An empty request resolves to [`Scope::Basic`], the scope every login needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeList(Vec<Scope>);
impl ScopeList {
	/// Validates raw scope names against the allow-list.
	pub fn parse<I, S>(scopes: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let scopes = scopes
			.into_iter()
			.map(|raw| raw.as_ref().parse::<Scope>())
			.collect::<Result<Vec<_>>>()?;

		Ok(Self::collect_unique(scopes))
	}

	/// Comma-joined form used by the authorization endpoint.
	pub fn joined(&self) -> String {
		self.0.iter().map(|scope| scope.as_str()).collect::<Vec<_>>().join(",")
	}

	/// Iterator over the scopes in request order.
	pub fn iter(&self) -> Iter<'_, Scope> {
		self.0.iter()
	}

	fn collect_unique(scopes: impl IntoIterator<Item = Scope>) -> Self {
		let mut list = Vec::new();

		for scope in scopes {
			if !list.contains(&scope) {
				list.push(scope);
			}
		}

		if list.is_empty() {
			list.push(Scope::Basic);
		}

		Self(list)
	}
}
impl From<Scope> for ScopeList {
	fn from(scope: Scope) -> Self {
		Self(vec![scope])
	}
}
impl FromIterator<Scope> for ScopeList {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = Scope>,
	{
		Self::collect_unique(iter)
	}
}
