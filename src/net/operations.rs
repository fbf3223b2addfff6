//! GraphQL operation documents used by the panel.
//!
//! One const per operation, named after the operation. The schema itself is
//! owned by the remote API; these documents only select the fields the
//! panel consumes.

/// Current authenticated user.
pub const ME: &str = r"
query Me {
  me {
    id
    name
    email
    role {
      name
      id
    }
  }
}";

/// Credential login. Returns the bearer token and the user with role.
pub const LOGIN: &str = r"
mutation Login($input: LoginInput!) {
  login(input: $input) {
    token
    user {
      id
      name
      email
      role {
        name
      }
    }
  }
}";

/// Account registration. Same payload shape as login.
pub const REGISTER: &str = r"
mutation Register($input: RegisterInput!) {
  register(input: $input) {
    token
    user {
      id
      name
      email
    }
  }
}";

/// Notification list for the bell dropdown.
pub const NOTIFICATIONS: &str = r"
query Notifications {
  notifications {
    id
    user {
      name
      id
    }
    message
    isRead
    createdAt
    metadata
  }
}";

/// Mark one notification as read.
pub const MARK_NOTIFICATION_AS_READ: &str = r"
mutation MarkNotificationAsRead($id: ID!) {
  markNotificationAsRead(id: $id)
}";

/// Live notification stream.
pub const NOTIFICATION_RECEIVED: &str = r"
subscription NotificationReceived {
  notificationReceived {
    id
    user {
      id
      name
    }
    message
    isRead
    createdAt
    metadata
  }
}";

/// Activity list, optionally filtered by user and capped.
pub const ACTIVITIES: &str = r"
query Activities($userId: ID, $status: String, $limit: Int) {
  activities(userId: $userId, status: $status, limit: $limit) {
    id
    user {
      id
      name
      email
    }
    type
    timestamp
    status
    metadata
  }
}";

/// Live activity stream.
pub const NEW_ACTIVITY_LOGGED: &str = r"
subscription NewActivityLogged {
  newActivityLogged {
    id
    user {
      id
      name
    }
    type
    timestamp
    status
  }
}";
