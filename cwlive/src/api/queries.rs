//! GraphQL documents used by the API wrappers.

/// Lists all organizations.
pub const LIST_ORGANIZATIONS_QUERY: &str = r"
  query ListOrganizations {
    listOrganizations {
      organizationId
      organizationName
      organizationType
      organizationCreated
      mainAdminUserId
      adminUserIds
      staffUserIds
    }
  }
";

/// Fetches one user by id.
pub const GET_CWL_USER_QUERY: &str = r"
  query GetCWLUser($userId: String!) {
    getCWLUser(userId: $userId) {
      userId
      userAddedById
      privacyPolicy
      termsAndConditions
      userFirstName
      userLastName
      userEmail
      userPhone
      userTitle
      userCreated
      organizationId
      userRole
      clientType
    }
  }
";

/// Creates a user through the `createCWLUser` pipeline resolver.
pub const CREATE_CWL_USER_MUTATION: &str = r"
  mutation CreateCWLUser($input: CWLUserInput!) {
    createCWLUser(input: $input) {
      userId
      userAddedById
      privacyPolicy
      termsAndConditions
      userFirstName
      userLastName
      userEmail
      userPhone
      userTitle
      userCreated
      organizationId
      userRole
    }
  }
";
