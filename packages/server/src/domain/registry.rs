//! Room Registry trait 定義
//!
//! ルームごとの在室状態（プレゼンス）へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{RoomId, RoomMember, UserId};

/// Room Registry trait
///
/// ルーム → 参加メンバーの対応を一元管理する、在室状態の唯一の情報源。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// ## 不変条件
///
/// - 1 つのルーム内でユーザー ID は一意（再入室は追加ではなく置き換え）
/// - すべての操作は呼び出し側から見てアトミック（途中状態は観測されない）
/// - どの操作も失敗しない（純粋なインメモリのマップ操作のため）
///
/// ## ルームのライフサイクル
///
/// ルームは最初の入室で暗黙に生成され、最後の退室で暗黙に消える。
/// 「ルーム作成」という操作はこの層には存在しない。
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// メンバーを追加（同一ユーザー ID は置き換え）し、追加後の全メンバーを返す
    async fn join(&self, room_id: RoomId, member: RoomMember) -> Vec<RoomMember>;

    /// メンバーを削除し、削除したエントリを返す（不在なら None、エラーではない）
    async fn leave(&self, room_id: &RoomId, user_id: &UserId) -> Option<RoomMember>;

    /// ルームの現在のメンバーを取得（順序は実装依存）
    async fn members_of(&self, room_id: &RoomId) -> Vec<RoomMember>;

    /// メンバーが 1 人以上いるルームの一覧を (ルーム ID, 人数) で取得
    async fn occupied_rooms(&self) -> Vec<(RoomId, usize)>;
}
