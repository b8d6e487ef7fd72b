//! Catalog of the simulated business platforms offered on the dashboard.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

const PLATFORMS: [Platform; 6] = [
    Platform {
        id: "scheduling",
        name: "Scheduling System",
        description: "Manage appointments, time slots and services",
    },
    Platform {
        id: "sales",
        name: "Sales System",
        description: "Sales, stock and customer control",
    },
    Platform {
        id: "finance",
        name: "Finance System",
        description: "Cash flow, payables and receivables",
    },
    Platform {
        id: "hr",
        name: "HR System",
        description: "Employee management and payroll",
    },
    Platform {
        id: "inventory",
        name: "Inventory System",
        description: "Stock and supplier control",
    },
    Platform {
        id: "reports",
        name: "Reports System",
        description: "Management reports and indicators",
    },
];

impl Platform {
    pub fn all() -> &'static [Platform] {
        &PLATFORMS
    }

    pub fn find(id: &str) -> Option<&'static Platform> {
        PLATFORMS.iter().find(|p| p.id == id)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<12} {} - {}", self.id, self.name, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let ids: Vec<_> = Platform::all().iter().map(|p| p.id).collect();
        assert_eq!(ids, ["scheduling", "sales", "finance", "hr", "inventory", "reports"]);
    }

    #[test]
    fn test_find() {
        assert_eq!(Platform::find("hr").map(|p| p.name), Some("HR System"));
        assert!(Platform::find("payroll").is_none());
    }
}
