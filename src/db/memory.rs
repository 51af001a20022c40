use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::career::{Career, CareerStatus};
use crate::db::career_repository::{CareerStore, StoreError};
use crate::db::models::{MemberRow, OrganizationRow};

/// In-process store used by handler and service tests
#[derive(Default)]
pub struct MemoryCareerStore {
    organizations: Mutex<HashMap<String, OrganizationRow>>,
    members: Mutex<Vec<(String, MemberRow)>>,
    careers: Mutex<HashMap<String, Career>>,
    unavailable: bool,
}

impl MemoryCareerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails, for exercising error paths
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_organization(self, id: &str, job_limit: Option<i32>, extra_job_slots: i32) -> Self {
        self.organizations.lock().unwrap().insert(
            id.to_string(),
            OrganizationRow {
                id: id.to_string(),
                name: format!("Organization {}", id),
                plan_id: job_limit.map(|_| "plan".to_string()),
                extra_job_slots,
                job_limit,
            },
        );
        self
    }

    pub fn with_member(self, org_id: &str, name: &str, email: &str) -> Self {
        self.members.lock().unwrap().push((
            org_id.to_string(),
            MemberRow {
                name: Some(name.to_string()),
                email: email.to_string(),
                image: None,
            },
        ));
        self
    }

    pub fn career(&self, id: &str) -> Option<Career> {
        self.careers.lock().unwrap().get(id).cloned()
    }

    pub fn career_count(&self) -> usize {
        self.careers.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl CareerStore for MemoryCareerStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }

    async fn find_organization(&self, org_id: &str) -> Result<Option<OrganizationRow>, StoreError> {
        self.check()?;
        Ok(self.organizations.lock().unwrap().get(org_id).cloned())
    }

    async fn count_active_careers(&self, org_id: &str) -> Result<i64, StoreError> {
        self.check()?;
        let count = self
            .careers
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.org_id == org_id && c.status == CareerStatus::Active)
            .count();
        Ok(count as i64)
    }

    async fn insert_career(&self, career: &Career) -> Result<(), StoreError> {
        self.check()?;
        let mut careers = self.careers.lock().unwrap();
        if careers.contains_key(&career.id) {
            return Err(StoreError::DuplicateKey(format!("careers.id = {}", career.id)));
        }
        careers.insert(career.id.clone(), career.clone());
        Ok(())
    }

    async fn find_career(&self, id: &str) -> Result<Option<Career>, StoreError> {
        self.check()?;
        Ok(self.career(id))
    }

    async fn replace_career(&self, career: &Career) -> Result<bool, StoreError> {
        self.check()?;
        let mut careers = self.careers.lock().unwrap();
        match careers.get_mut(&career.id) {
            Some(existing) => {
                *existing = career.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_members(&self, org_id: &str) -> Result<Vec<MemberRow>, StoreError> {
        self.check()?;
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|(org, _)| org == org_id)
            .map(|(_, member)| member.clone())
            .collect())
    }

    async fn set_extra_job_slots(&self, org_id: &str, slots: i32) -> Result<bool, StoreError> {
        self.check()?;
        match self.organizations.lock().unwrap().get_mut(org_id) {
            Some(org) => {
                org.extra_job_slots = slots;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
