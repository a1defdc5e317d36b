use serde::Serialize;

ordinal_enum! {
    /// Syntactic category of a [`Phrase`](super::Phrase).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
    pub enum PhraseKind {
        Unknown,
        AdditiveExpression,
        AnonymousClassDeclaration,
        AnonymousClassDeclarationHeader,
        AnonymousFunctionCreationExpression,
        AnonymousFunctionHeader,
        AnonymousFunctionUseClause,
        AnonymousFunctionUseVariable,
        ArgumentExpressionList,
        ArrayCreationExpression,
        ArrayElement,
        ArrayInitialiserList,
        ArrayKey,
        ArrayValue,
        BitwiseExpression,
        BreakStatement,
        ByRefAssignmentExpression,
        CaseStatement,
        CaseStatementList,
        CastExpression,
        CatchClause,
        CatchClauseList,
        CatchNameList,
        ClassBaseClause,
        ClassConstantAccessExpression,
        ClassConstDeclaration,
        ClassConstElement,
        ClassConstElementList,
        ClassDeclaration,
        ClassDeclarationBody,
        ClassDeclarationHeader,
        ClassInterfaceClause,
        ClassMemberDeclarationList,
        ClassModifiers,
        ClassTypeDesignator,
        CloneExpression,
        ClosureUseList,
        CoalesceExpression,
        CompoundAssignmentExpression,
        CompoundStatement,
        ConstantAccessExpression,
        ConstDeclaration,
        ConstElement,
        ConstElementList,
        ContinueStatement,
        DeclareDirective,
        DeclareStatement,
        DefaultStatement,
        DoStatement,
        DoubleQuotedStringLiteral,
        EchoIntrinsic,
        ElseClause,
        ElseIfClause,
        ElseIfClauseList,
        EmptyIntrinsic,
        EncapsulatedExpression,
        EncapsulatedVariable,
        EncapsulatedVariableList,
        EqualityExpression,
        Error,
        ErrorClassMemberDeclaration,
        ErrorClassTypeDesignatorAtom,
        ErrorControlExpression,
        ErrorExpression,
        ErrorScopedAccessExpression,
        ErrorTraitAdaptation,
        ErrorVariable,
        ErrorVariableAtom,
        EvalIntrinsic,
        ExitIntrinsic,
        ExponentiationExpression,
        ExpressionList,
        ExpressionStatement,
        FinallyClause,
        ForControl,
        ForEachCollection,
        ForEachKey,
        ForEachStatement,
        ForEachValue,
        ForEndOfLoop,
        ForExpressionGroup,
        ForInitialiser,
        ForStatement,
        FullyQualifiedName,
        FunctionCallExpression,
        FunctionDeclaration,
        FunctionDeclarationBody,
        FunctionDeclarationHeader,
        FunctionStaticDeclaration,
        FunctionStaticInitialiser,
        GlobalDeclaration,
        GotoStatement,
        HaltCompilerStatement,
        HeredocStringLiteral,
        Identifier,
        IfStatement,
        IncludeExpression,
        IncludeOnceExpression,
        InlineText,
        InstanceOfExpression,
        InstanceofTypeDesignator,
        InterfaceBaseClause,
        InterfaceDeclaration,
        InterfaceDeclarationBody,
        InterfaceDeclarationHeader,
        InterfaceMemberDeclarationList,
        IssetIntrinsic,
        ListIntrinsic,
        LogicalExpression,
        MemberModifierList,
        MemberName,
        MethodCallExpression,
        MethodDeclaration,
        MethodDeclarationBody,
        MethodDeclarationHeader,
        MethodReference,
        MultiplicativeExpression,
        NamedLabelStatement,
        NamespaceAliasingClause,
        NamespaceDefinition,
        NamespaceName,
        NamespaceUseClause,
        NamespaceUseClauseList,
        NamespaceUseDeclaration,
        NamespaceUseGroupClause,
        NamespaceUseGroupClauseList,
        NullStatement,
        ObjectCreationExpression,
        ParameterDeclaration,
        ParameterDeclarationList,
        PostfixDecrementExpression,
        PostfixIncrementExpression,
        PrefixDecrementExpression,
        PrefixIncrementExpression,
        PrintIntrinsic,
        PropertyAccessExpression,
        PropertyDeclaration,
        PropertyElement,
        PropertyElementList,
        PropertyInitialiser,
        QualifiedName,
        QualifiedNameList,
        RelationalExpression,
        RelativeQualifiedName,
        RelativeScope,
        RequireExpression,
        RequireOnceExpression,
        ReturnStatement,
        ReturnType,
        ScopedCallExpression,
        ScopedMemberName,
        ScopedPropertyAccessExpression,
        ShellCommandExpression,
        ShiftExpression,
        SimpleAssignmentExpression,
        SimpleVariable,
        StatementList,
        StaticVariableDeclaration,
        StaticVariableDeclarationList,
        SubscriptExpression,
        SwitchStatement,
        TernaryExpression,
        ThrowStatement,
        TraitAdaptationList,
        TraitAlias,
        TraitDeclaration,
        TraitDeclarationBody,
        TraitDeclarationHeader,
        TraitMemberDeclarationList,
        TraitPrecedence,
        TraitUseClause,
        TraitUseSpecification,
        TryStatement,
        TypeDeclaration,
        UnaryOpExpression,
        UnsetIntrinsic,
        VariableList,
        VariableNameList,
        VariadicUnpacking,
        WhileStatement,
        YieldExpression,
        YieldFromExpression,
    }
}

impl PhraseKind {
    /// Placeholder categories produced when a production found no valid input.
    pub fn is_error(self) -> bool {
        matches!(
            self,
            PhraseKind::Error
                | PhraseKind::ErrorClassMemberDeclaration
                | PhraseKind::ErrorClassTypeDesignatorAtom
                | PhraseKind::ErrorExpression
                | PhraseKind::ErrorScopedAccessExpression
                | PhraseKind::ErrorTraitAdaptation
                | PhraseKind::ErrorVariable
                | PhraseKind::ErrorVariableAtom
        )
    }
}
