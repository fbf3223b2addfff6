//! Role-gated sidebar menu construction.
//!
//! DESIGN
//! ======
//! Role differentiation happens here, not in the route guard. Admins see
//! every section; instructors and students see their own; viewers and
//! unknown roles get the common dashboard only.

#[cfg(test)]
#[path = "menu_test.rs"]
mod tests;

use crate::auth::role::Role;

/// One sidebar entry: route key, label, and icon name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

const fn item(key: &'static str, label: &'static str, icon: &'static str) -> MenuItem {
    MenuItem { key, label, icon }
}

/// Visible to everyone.
const COMMON_ITEMS: &[MenuItem] = &[item("/admin", "Dashboard", "dashboard")];

const STUDENT_ITEMS: &[MenuItem] = &[
    item("/admin/my-enrollments", "My Enrollments", "container"),
    item("/admin/my-queries", "My Queries", "inbox"),
];

const INSTRUCTOR_ITEMS: &[MenuItem] = &[
    item("/admin/my-courses", "My Courses", "read"),
    item("/admin/queries", "Student Queries", "question-circle"),
    item("/admin/assignments", "Assignments", "form"),
    item("/admin/enrollments", "Enrollments", "solution"),
    item("/admin/announcements", "Announcements", "notification"),
    item("/admin/activities", "Activities", "unordered-list"),
    item("/admin/reports", "Reports", "file-text"),
];

const ADMIN_ITEMS: &[MenuItem] = &[
    item("/admin/courses", "Courses", "book"),
    item("/admin/users", "Users", "team"),
    item("/admin/roles", "Roles", "safety-certificate"),
];

/// Build the sidebar for a role.
///
/// SUPER_ADMIN and ADMIN see everything; INSTRUCTOR and STUDENT see their
/// own sections; VIEWER and unknown/missing roles see the dashboard only.
#[must_use]
pub fn sidebar_items(role: Option<Role>) -> Vec<MenuItem> {
    let sections: &[&[MenuItem]] = match role {
        Some(Role::SuperAdmin | Role::Admin) => {
            &[COMMON_ITEMS, INSTRUCTOR_ITEMS, STUDENT_ITEMS, ADMIN_ITEMS]
        }
        Some(Role::Instructor) => &[COMMON_ITEMS, INSTRUCTOR_ITEMS],
        Some(Role::Student) => &[COMMON_ITEMS, STUDENT_ITEMS],
        Some(Role::Viewer) | None => &[COMMON_ITEMS],
    };
    sections.iter().flat_map(|section| section.iter().copied()).collect()
}
