//! Relationship actions accepted by the relationship endpoint.

// self
use crate::_prelude::*;

/// Change applied to the relationship with another user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipAction {
	/// Start following.
	Follow,
	/// Stop following.
	Unfollow,
	/// Block the user.
	Block,
	/// Lift a block.
	Unblock,
	/// Accept a pending follow request.
	Approve,
	/// Reject a pending follow request.
	Deny,
}
impl RelationshipAction {
	/// Every accepted action.
	pub const ALL: [Self; 6] =
		[Self::Follow, Self::Unfollow, Self::Block, Self::Unblock, Self::Approve, Self::Deny];

	/// Wire name of the action.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Follow => "follow",
			Self::Unfollow => "unfollow",
			Self::Block => "block",
			Self::Unblock => "unblock",
			Self::Approve => "approve",
			Self::Deny => "deny",
		}
	}
}
impl Display for RelationshipAction {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for RelationshipAction {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Self::ALL
			.into_iter()
			.find(|action| action.as_str() == s)
			.ok_or_else(|| Error::InvalidRelationshipAction { action: s.to_owned() })
	}
}
