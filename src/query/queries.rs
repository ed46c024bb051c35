// 이벤트 조회 공통 SELECT (작성자 이름, 상품 수 포함)
macro_rules! event_select {
    () => {
        r#"
    SELECT e.id, e.name, e.city, e.state, e.zip_code, e.start_datetime, e.end_datetime,
           e.created_at, e.updated_at, e.created_by_id AS created_by,
           u.username AS created_by_username, e.is_active,
           (SELECT COUNT(*) FROM auction_items i WHERE i.auction_event_id = e.id) AS items_count
    FROM auction_events e
    JOIN users u ON u.id = e.created_by_id
"#
    };
}

// 상품 조회 공통 SELECT (소유자, 낙찰자, 이벤트 이름 포함)
macro_rules! item_select {
    () => {
        r#"
    SELECT i.id, i.auction_event_id AS auction_event, i.name, i.description, i.image_url,
           i.owner_id AS owner, o.username AS owner_username,
           i.starting_price, i.current_price, i.status, i.created_at, i.updated_at,
           i.sold_at, i.sold_to_id AS sold_to, s.username AS sold_to_username,
           e.name AS auction_event_name
    FROM auction_items i
    JOIN users o ON o.id = i.owner_id
    JOIN auction_events e ON e.id = i.auction_event_id
    LEFT JOIN users s ON s.id = i.sold_to_id
"#
    };
}

// region:    --- Auction Events
/// 이벤트 목록 필터링용 기본 SELECT
pub const EVENT_SELECT: &str = event_select!();

/// 모든 이벤트 조회
pub const GET_ALL_EVENTS: &str = concat!(event_select!(), " ORDER BY e.id");

/// 이벤트 조회
pub const GET_EVENT: &str = concat!(event_select!(), " WHERE e.id = $1");

/// 이벤트 생성
pub const INSERT_EVENT: &str = r#"
    INSERT INTO auction_events
        (name, city, state, zip_code, start_datetime, end_datetime, created_by_id, is_active)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
    RETURNING id
"#;

/// 이벤트 수정 (NULL 인 파라미터는 기존 값 유지)
pub const UPDATE_EVENT: &str = r#"
    UPDATE auction_events SET
        name = COALESCE($2, name),
        city = COALESCE($3, city),
        state = COALESCE($4, state),
        zip_code = COALESCE($5, zip_code),
        start_datetime = COALESCE($6, start_datetime),
        end_datetime = COALESCE($7, end_datetime),
        created_by_id = COALESCE($8, created_by_id),
        is_active = COALESCE($9, is_active),
        updated_at = NOW()
    WHERE id = $1
    RETURNING id
"#;

/// 이벤트 삭제 (상품은 FK 로 함께 삭제)
pub const DELETE_EVENT: &str = "DELETE FROM auction_events WHERE id = $1";
// endregion: --- Auction Events

// region:    --- Auction Items
/// 상품 목록 필터링용 기본 SELECT
pub const ITEM_SELECT: &str = item_select!();

/// 모든 상품 조회
pub const GET_ALL_ITEMS: &str = concat!(item_select!(), " ORDER BY i.id");

/// 상품 조회
pub const GET_ITEM: &str = concat!(item_select!(), " WHERE i.id = $1");

/// 수정 대상 상품 잠금 조회
pub const GET_ITEM_RECORD_FOR_UPDATE: &str = r#"
    SELECT auction_event_id, name, description, image_url, owner_id,
           starting_price, current_price, status, sold_at, sold_to_id
    FROM auction_items
    WHERE id = $1
    FOR UPDATE
"#;

/// 상품 생성
pub const INSERT_ITEM: &str = r#"
    INSERT INTO auction_items
        (auction_event_id, name, description, image_url, owner_id,
         starting_price, current_price, status, sold_at, sold_to_id)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
    RETURNING id
"#;

/// 상품 수정
pub const UPDATE_ITEM: &str = r#"
    UPDATE auction_items SET
        auction_event_id = $2,
        name = $3,
        description = $4,
        image_url = $5,
        owner_id = $6,
        starting_price = $7,
        current_price = $8,
        status = $9,
        sold_at = $10,
        sold_to_id = $11,
        updated_at = NOW()
    WHERE id = $1
"#;

/// 상품 삭제
pub const DELETE_ITEM: &str = "DELETE FROM auction_items WHERE id = $1";
// endregion: --- Auction Items

// region:    --- Users
/// 모든 사용자 조회
pub const GET_ALL_USERS: &str = r#"
    SELECT id, username, email, first_name, last_name, is_staff, is_active, date_joined, last_login
    FROM users
    ORDER BY id
"#;

/// 사용자 조회
pub const GET_USER: &str = r#"
    SELECT id, username, email, first_name, last_name, is_staff, is_active, date_joined, last_login
    FROM users
    WHERE id = $1
"#;

/// 사용자 생성
pub const INSERT_USER: &str = r#"
    INSERT INTO users (username, email, first_name, last_name, is_staff, is_active)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id, username, email, first_name, last_name, is_staff, is_active,
              date_joined, last_login
"#;

/// 사용자 삭제 (작성 이벤트/소유 상품 삭제, 낙찰 상품은 sold_to 만 NULL)
pub const DELETE_USER: &str = "DELETE FROM users WHERE id = $1";
// endregion: --- Users
