use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Username,
    Email,
    Password,
    IsSuperuser,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Category {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Meal {
    Table,
    Id,
    Slug,
    Name,
    Description,
    People,
    Price,
    PreparationTime,
    Image,
    CategoryId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum Cook {
    Table,
    Id,
    FirstName,
    LastName,
    About,
    Position,
    Image,
    CreatedAt,
}
