//! # JSON:API Documents
//!
//! Decodes the resource service's `application/vnd.api+json` documents into [`User`] and
//! [`Team`] values. Relationships are resolved against the primary data and the `included`
//! array; a linked resource that is not included keeps its id and uses it as its name.

use serde::Deserialize;
use serde::de::Error as _;
use serde_json::{Value, json};
use std::collections::HashMap;

use crate::domain::types::{Team, TeamMember, User};

pub const MEDIA_TYPE: &str = "application/vnd.api+json";

const USERS: &str = "users";
const TEAMS: &str = "teams";

#[derive(Debug, Deserialize)]
struct Document {
    data: Option<Linkage<Resource>>,
    #[serde(default)]
    included: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Linkage<T> {
    Many(Vec<T>),
    One(T),
}

#[derive(Debug, Deserialize)]
struct Resource {
    #[serde(rename = "type")]
    kind: String,
    id: String,
    #[serde(default)]
    attributes: Attributes,
    #[serde(default)]
    relationships: HashMap<String, Relationship>,
}

#[derive(Debug, Default, Deserialize)]
struct Attributes {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    motto: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Relationship {
    #[serde(default)]
    data: Option<Linkage<Identifier>>,
}

#[derive(Debug, Deserialize)]
struct Identifier {
    #[serde(rename = "type")]
    kind: String,
    id: String,
}

/// Every resource in a document, addressable by (type, id).
struct Index<'a> {
    resources: HashMap<(&'a str, &'a str), &'a Resource>,
}

impl<'a> Index<'a> {
    fn new(primary: &'a [Resource], included: &'a [Resource]) -> Self {
        let resources = primary
            .iter()
            .chain(included)
            .map(|r| ((r.kind.as_str(), r.id.as_str()), r))
            .collect();
        Self { resources }
    }

    fn get(&self, kind: &str, id: &str) -> Option<&'a Resource> {
        self.resources.get(&(kind, id)).copied()
    }

    fn user(&self, resource: &Resource) -> User {
        let team = related(resource, "team")
            .first()
            .filter(|link| link.kind == TEAMS)
            .map(|link| match self.get(TEAMS, &link.id) {
                Some(team) => self.team(team),
                None => Team {
                    id: link.id.clone(),
                    name: link.id.clone(),
                    motto: None,
                    members: Vec::new(),
                },
            });
        User {
            id: resource.id.clone(),
            name: display_name(resource),
            team,
        }
    }

    fn team(&self, resource: &Resource) -> Team {
        let members = related(resource, "members")
            .into_iter()
            .filter(|link| link.kind == USERS)
            .map(|link| TeamMember {
                id: link.id.clone(),
                name: self
                    .get(USERS, &link.id)
                    .map(display_name)
                    .unwrap_or_else(|| link.id.clone()),
            })
            .collect();
        Team {
            id: resource.id.clone(),
            name: display_name(resource),
            motto: resource.attributes.motto.clone(),
            members,
        }
    }
}

fn related<'a>(resource: &'a Resource, name: &str) -> Vec<&'a Identifier> {
    match resource.relationships.get(name).and_then(|r| r.data.as_ref()) {
        Some(Linkage::One(link)) => vec![link],
        Some(Linkage::Many(links)) => links.iter().collect(),
        None => Vec::new(),
    }
}

fn display_name(resource: &Resource) -> String {
    resource
        .attributes
        .name
        .clone()
        .unwrap_or_else(|| resource.id.clone())
}

fn parse(body: &str) -> Result<(Vec<Resource>, Vec<Resource>), serde_json::Error> {
    let document: Document = serde_json::from_str(body)?;
    let primary = match document.data {
        Some(Linkage::One(resource)) => vec![resource],
        Some(Linkage::Many(resources)) => resources,
        None => Vec::new(),
    };
    Ok((primary, document.included))
}

fn single<'a>(primary: &'a [Resource], kind: &str) -> Result<&'a Resource, serde_json::Error> {
    match primary {
        [resource] if resource.kind == kind => Ok(resource),
        _ => Err(serde_json::Error::custom(format!(
            "expected a single {kind} resource"
        ))),
    }
}

pub fn decode_user(body: &str) -> Result<User, serde_json::Error> {
    let (primary, included) = parse(body)?;
    let index = Index::new(&primary, &included);
    Ok(index.user(single(&primary, USERS)?))
}

pub fn decode_team(body: &str) -> Result<Team, serde_json::Error> {
    let (primary, included) = parse(body)?;
    let index = Index::new(&primary, &included);
    Ok(index.team(single(&primary, TEAMS)?))
}

pub fn decode_teams(body: &str) -> Result<Vec<Team>, serde_json::Error> {
    let (primary, included) = parse(body)?;
    let index = Index::new(&primary, &included);
    Ok(primary
        .iter()
        .filter(|r| r.kind == TEAMS)
        .map(|r| index.team(r))
        .collect())
}

pub fn new_user(id: &str, name: &str) -> Value {
    json!({
        "data": {
            "type": USERS,
            "id": id,
            "attributes": { "name": name },
        }
    })
}

pub fn new_team(name: &str, member_id: &str) -> Value {
    json!({
        "data": {
            "type": TEAMS,
            "attributes": { "name": name },
            "relationships": {
                "members": { "data": [{ "type": USERS, "id": member_id }] }
            },
        }
    })
}

pub fn member_list(user_id: &str) -> Value {
    json!({ "data": [{ "type": USERS, "id": user_id }] })
}

pub fn motto_patch(team_id: &str, motto: &str) -> Value {
    json!({
        "data": {
            "type": TEAMS,
            "id": team_id,
            "attributes": { "motto": motto },
        }
    })
}
